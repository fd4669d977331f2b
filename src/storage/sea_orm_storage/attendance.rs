use super::SeaOrmStorage;
use crate::config::AppConfig;
use crate::entity::attendance_records::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as AttendanceRecords,
};
use crate::entity::attendance_sessions::{
    ActiveModel as SessionActiveModel, Column as SessionColumn, Entity as AttendanceSessions,
};
use crate::entity::{devices, enrollments, students};
use crate::errors::{Result, SiabsenError};
use crate::models::attendance::{
    entities::{AttendanceRecord, AttendanceSession, AttendanceStatus, SessionStatus},
    requests::{CheckInData, SessionListQuery},
    responses::{
        SessionDetailResponse, SessionListResponse, SessionRosterEntry, SessionSummary,
        SessionWithClass,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    TryInsertResult, sea_query::OnConflict,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// Opens a session for a class. The single-active-session check and the
    /// insert share a transaction; SQLite's single writer keeps concurrent
    /// starts from interleaving, the server backends would need a locking
    /// read on top.
    pub async fn start_session_impl(
        &self,
        class_id: i64,
        lecturer_id: i64,
        device_id: i64,
        title: &str,
        duration_minutes: i32,
        code: &str,
    ) -> Result<Option<AttendanceSession>> {
        let txn = self.db.begin().await.map_err(|e| {
            SiabsenError::database_operation(format!("Begin transaction failed: {e}"))
        })?;

        let already_active = AttendanceSessions::find()
            .filter(SessionColumn::ClassId.eq(class_id))
            .filter(SessionColumn::Status.eq(SessionStatus::Active.to_string()))
            .one(&txn)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query session failed: {e}")))?
            .is_some();

        if already_active {
            txn.rollback().await.ok();
            return Ok(None);
        }

        let model = SessionActiveModel {
            class_id: Set(class_id),
            lecturer_id: Set(lecturer_id),
            device_id: Set(device_id),
            title: Set(title.to_string()),
            code: Set(code.to_string()),
            status: Set(SessionStatus::Active.to_string()),
            duration_minutes: Set(duration_minutes),
            started_at: Set(chrono::Utc::now().timestamp()),
            ended_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Create session failed: {e}")))?;

        txn.commit().await.map_err(|e| {
            SiabsenError::database_operation(format!("Commit session failed: {e}"))
        })?;

        Ok(Some(result.into_session()))
    }

    pub async fn get_session_by_id_impl(&self, id: i64) -> Result<Option<AttendanceSession>> {
        let result = AttendanceSessions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query session failed: {e}")))?;

        Ok(result.map(|m| m.into_session()))
    }

    pub async fn get_active_session_for_device_impl(
        &self,
        device_id: i64,
    ) -> Result<Option<AttendanceSession>> {
        let result = AttendanceSessions::find()
            .filter(SessionColumn::DeviceId.eq(device_id))
            .filter(SessionColumn::Status.eq(SessionStatus::Active.to_string()))
            .order_by_desc(SessionColumn::StartedAt)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query session failed: {e}")))?;

        Ok(result.map(|m| m.into_session()))
    }

    /// Conditional close. Only a row still in `active` is touched, so two
    /// concurrent stops cannot both report success.
    pub async fn end_session_impl(
        &self,
        session_id: i64,
        status: SessionStatus,
    ) -> Result<Option<AttendanceSession>> {
        let now = chrono::Utc::now().timestamp();

        let result = AttendanceSessions::update_many()
            .col_expr(
                SessionColumn::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .col_expr(SessionColumn::EndedAt, sea_orm::sea_query::Expr::value(now))
            .filter(SessionColumn::Id.eq(session_id))
            .filter(SessionColumn::Status.eq(SessionStatus::Active.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("End session failed: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_session_by_id_impl(session_id).await
    }

    pub async fn list_sessions_impl(&self, query: SessionListQuery) -> Result<SessionListResponse> {
        let mut select = AttendanceSessions::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(SessionColumn::ClassId.eq(class_id));
        }
        if let Some(lecturer_id) = query.lecturer_id {
            select = select.filter(SessionColumn::LecturerId.eq(lecturer_id));
        }
        if let Some(status) = query.status {
            select = select.filter(SessionColumn::Status.eq(status.to_string()));
        }

        let sessions: Vec<AttendanceSession> = select
            .order_by_desc(SessionColumn::StartedAt)
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("List sessions failed: {e}")))?
            .into_iter()
            .map(|m| m.into_session())
            .collect();

        let class_ids: Vec<i64> = sessions.iter().map(|s| s.class_id).collect();
        let classes: Vec<_> = crate::entity::class_sections::Entity::find()
            .filter(crate::entity::class_sections::Column::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query classes failed: {e}")))?
            .into_iter()
            .map(|m| m.into_class_section())
            .collect();

        let details = self.attach_class_relations(classes).await?;
        let by_id: HashMap<i64, _> = details.into_iter().map(|d| (d.class.id, d)).collect();

        Ok(SessionListResponse {
            items: sessions
                .into_iter()
                .map(|session| {
                    let class = by_id.get(&session.class_id).cloned();
                    SessionWithClass { session, class }
                })
                .collect(),
        })
    }

    /// Full session view: class, device, and one roster line per actively
    /// enrolled student. Students without a record appear as absent.
    pub async fn session_detail_impl(
        &self,
        session_id: i64,
    ) -> Result<Option<SessionDetailResponse>> {
        let Some(session) = self.get_session_by_id_impl(session_id).await? else {
            return Ok(None);
        };

        let class = self.get_class_detail_impl(session.class_id).await?;

        let device = devices::Entity::find_by_id(session.device_id)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query device failed: {e}")))?
            .map(|m| {
                m.into_device(
                    chrono::Utc::now(),
                    AppConfig::get().attendance.device_offline_secs,
                )
            });

        let enrolled = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(session.class_id))
            .filter(enrollments::Column::Active.eq(true))
            .find_also_related(students::Entity)
            .order_by_asc(students::Column::Nim)
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query roster failed: {e}")))?;

        let mut records: HashMap<i64, AttendanceRecord> = AttendanceRecords::find()
            .filter(RecordColumn::SessionId.eq(session_id))
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query records failed: {e}")))?
            .into_iter()
            .map(|m| {
                let record = m.into_record();
                (record.student_id, record)
            })
            .collect();

        let roster: Vec<SessionRosterEntry> = enrolled
            .into_iter()
            .filter_map(|(_, student)| student)
            .map(|student| {
                let student = student.into_student();
                let record = records.remove(&student.id);
                let status = record
                    .as_ref()
                    .map(|r| r.status)
                    .unwrap_or(AttendanceStatus::Absent);
                SessionRosterEntry {
                    student,
                    status,
                    record,
                }
            })
            .collect();

        let summary = SessionSummary::from_roster(&roster);

        Ok(Some(SessionDetailResponse {
            session,
            class,
            device,
            roster,
            summary,
        }))
    }

    /// Insert-or-fetch for a device check-in. The unique (session, student)
    /// index plus ON CONFLICT DO NOTHING makes concurrent duplicate scans
    /// converge on one row. The bool is false for the duplicate.
    pub async fn check_in_impl(&self, data: CheckInData) -> Result<(AttendanceRecord, bool)> {
        let now = chrono::Utc::now().timestamp();

        let model = RecordActiveModel {
            session_id: Set(data.session_id),
            student_id: Set(data.student_id),
            status: Set(AttendanceStatus::Present.to_string()),
            recorded_at: Set(now),
            location: Set(data.location),
            confidence: Set(Some(data.confidence)),
            photo_path: Set(None),
            device_id: Set(Some(data.device_id)),
            client_ip: Set(data.client_ip),
            user_agent: Set(data.user_agent),
            validated: Set(true),
            note: Set(None),
            ..Default::default()
        };

        let outcome = AttendanceRecords::insert(model)
            .on_conflict(
                OnConflict::columns([RecordColumn::SessionId, RecordColumn::StudentId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Check-in failed: {e}")))?;

        let created = matches!(outcome, TryInsertResult::Inserted(_));

        let record = AttendanceRecords::find()
            .filter(RecordColumn::SessionId.eq(data.session_id))
            .filter(RecordColumn::StudentId.eq(data.student_id))
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query record failed: {e}")))?
            .ok_or_else(|| {
                SiabsenError::database_operation("Check-in row missing after insert".to_string())
            })?;

        Ok((record.into_record(), created))
    }

    /// Lecturer-entered record. None when the student already has one; the
    /// duplicate window is closed the same way as check_in.
    pub async fn manual_mark_impl(
        &self,
        session_id: i64,
        student_id: i64,
        status: AttendanceStatus,
        note: Option<String>,
    ) -> Result<Option<AttendanceRecord>> {
        let now = chrono::Utc::now().timestamp();

        let model = RecordActiveModel {
            session_id: Set(session_id),
            student_id: Set(student_id),
            status: Set(status.to_string()),
            recorded_at: Set(now),
            location: Set(None),
            confidence: Set(None),
            photo_path: Set(None),
            device_id: Set(None),
            client_ip: Set(None),
            user_agent: Set(None),
            // Entered by the session owner, so it needs no later validation
            validated: Set(true),
            note: Set(note),
            ..Default::default()
        };

        let outcome = AttendanceRecords::insert(model)
            .on_conflict(
                OnConflict::columns([RecordColumn::SessionId, RecordColumn::StudentId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Manual mark failed: {e}")))?;

        if !matches!(outcome, TryInsertResult::Inserted(_)) {
            return Ok(None);
        }

        let record = AttendanceRecords::find()
            .filter(RecordColumn::SessionId.eq(session_id))
            .filter(RecordColumn::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query record failed: {e}")))?
            .ok_or_else(|| {
                SiabsenError::database_operation("Record row missing after insert".to_string())
            })?;

        Ok(Some(record.into_record()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{seed_class, seed_device, seed_student, storage};
    use crate::models::attendance::entities::AttendanceStatus;

    #[tokio::test]
    async fn test_manual_record_is_stored_validated() {
        let storage = storage().await;
        let (class_id, lecturer_id) = seed_class(&storage, 5).await;
        let device_id = seed_device(&storage, "DEV-1").await;
        let student_id = seed_student(&storage, "2101010").await;

        let session = storage
            .start_session_impl(class_id, lecturer_id, device_id, "Pertemuan 1", 90, "AB12CD")
            .await
            .expect("start")
            .expect("no active session yet");

        let record = storage
            .manual_mark_impl(
                session.id,
                student_id,
                AttendanceStatus::Sick,
                Some("Surat dokter".to_string()),
            )
            .await
            .expect("mark")
            .expect("first record for this student");

        assert_eq!(record.status, AttendanceStatus::Sick);
        assert!(record.validated);

        // Second mark for the same student hits the unique (session, student)
        // pair and reports a duplicate.
        let duplicate = storage
            .manual_mark_impl(session.id, student_id, AttendanceStatus::Excused, None)
            .await
            .expect("mark");
        assert!(duplicate.is_none());
    }
}
