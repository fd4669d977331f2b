use super::SeaOrmStorage;
use crate::config::AppConfig;
use crate::entity::{
    attendance_records, attendance_sessions, class_sections, courses, devices, enrollments,
    lecturers, students,
};
use crate::errors::{Result, SiabsenError};
use crate::models::attendance::entities::AttendanceStatus;
use crate::models::reports::{
    percentage,
    responses::{ActivityItem, AdminDashboard, LecturerDashboard, StudentDashboard},
};
use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

fn today_start_timestamp() -> i64 {
    Utc::now()
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp()
}

impl SeaOrmStorage {
    pub async fn admin_dashboard_impl(&self) -> Result<AdminDashboard> {
        let count = |e: &'static str| {
            move |err: sea_orm::DbErr| {
                SiabsenError::database_operation(format!("Count {e} failed: {err}"))
            }
        };

        let total_students = students::Entity::find()
            .count(&self.db)
            .await
            .map_err(count("students"))? as i64;
        let total_lecturers = lecturers::Entity::find()
            .count(&self.db)
            .await
            .map_err(count("lecturers"))? as i64;
        let total_courses = courses::Entity::find()
            .count(&self.db)
            .await
            .map_err(count("courses"))? as i64;
        let total_classes = class_sections::Entity::find()
            .count(&self.db)
            .await
            .map_err(count("classes"))? as i64;
        let total_devices = devices::Entity::find()
            .count(&self.db)
            .await
            .map_err(count("devices"))? as i64;

        let online_cutoff =
            Utc::now().timestamp() - AppConfig::get().attendance.device_offline_secs;
        let online_devices = devices::Entity::find()
            .filter(devices::Column::LastHeartbeat.gte(online_cutoff))
            .count(&self.db)
            .await
            .map_err(count("online devices"))? as i64;

        let today = today_start_timestamp();

        let today_sessions = attendance_sessions::Entity::find()
            .filter(attendance_sessions::Column::StartedAt.gte(today))
            .count(&self.db)
            .await
            .map_err(count("sessions"))? as i64;

        let total_absensi = attendance_records::Entity::find()
            .filter(attendance_records::Column::RecordedAt.gte(today))
            .count(&self.db)
            .await
            .map_err(count("records"))? as i64;

        let hadir = attendance_records::Entity::find()
            .filter(attendance_records::Column::RecordedAt.gte(today))
            .filter(
                attendance_records::Column::Status.eq(AttendanceStatus::Present.to_string()),
            )
            .count(&self.db)
            .await
            .map_err(count("present records"))? as i64;

        let recent = attendance_records::Entity::find()
            .find_also_related(students::Entity)
            .order_by_desc(attendance_records::Column::RecordedAt)
            .limit(10)
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query activity failed: {e}")))?;

        let recent_activity = recent
            .into_iter()
            .map(|(record, student)| {
                let record = record.into_record();
                ActivityItem {
                    record_id: record.id,
                    session_id: record.session_id,
                    student_name: student
                        .map(|s| s.full_name)
                        .unwrap_or_else(|| "Unknown".to_string()),
                    status: record.status,
                    recorded_at: record.recorded_at,
                }
            })
            .collect();

        Ok(AdminDashboard {
            total_students,
            total_lecturers,
            total_courses,
            total_classes,
            total_devices,
            online_devices,
            today_sessions,
            total_absensi,
            hadir,
            hadir_percentage: percentage(hadir, total_absensi),
            recent_activity,
        })
    }

    pub async fn lecturer_dashboard_impl(&self, lecturer_id: i64) -> Result<LecturerDashboard> {
        let class_ids: Vec<i64> = class_sections::Entity::find()
            .filter(class_sections::Column::LecturerId.eq(lecturer_id))
            .select_only()
            .column(class_sections::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query classes failed: {e}")))?;

        let total_classes = class_ids.len() as i64;
        let today = today_start_timestamp();

        let session_ids: Vec<i64> = attendance_sessions::Entity::find()
            .filter(attendance_sessions::Column::ClassId.is_in(class_ids))
            .filter(attendance_sessions::Column::StartedAt.gte(today))
            .select_only()
            .column(attendance_sessions::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query sessions failed: {e}")))?;

        let today_sessions = session_ids.len() as i64;

        let total_absensi = attendance_records::Entity::find()
            .filter(attendance_records::Column::SessionId.is_in(session_ids.clone()))
            .count(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Count records failed: {e}")))?
            as i64;

        let hadir = attendance_records::Entity::find()
            .filter(attendance_records::Column::SessionId.is_in(session_ids))
            .filter(
                attendance_records::Column::Status.eq(AttendanceStatus::Present.to_string()),
            )
            .count(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Count records failed: {e}")))?
            as i64;

        Ok(LecturerDashboard {
            total_classes,
            today_sessions,
            total_absensi,
            hadir,
            hadir_percentage: percentage(hadir, total_absensi),
        })
    }

    pub async fn student_dashboard_impl(&self, student_id: i64) -> Result<StudentDashboard> {
        let count_status = |status: AttendanceStatus| {
            let db = self.db.clone();
            async move {
                attendance_records::Entity::find()
                    .filter(attendance_records::Column::StudentId.eq(student_id))
                    .filter(attendance_records::Column::Status.eq(status.to_string()))
                    .count(&db)
                    .await
                    .map(|c| c as i64)
                    .map_err(|e| {
                        SiabsenError::database_operation(format!("Count records failed: {e}"))
                    })
            }
        };

        let total_records = attendance_records::Entity::find()
            .filter(attendance_records::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Count records failed: {e}")))?
            as i64;

        let hadir = count_status(AttendanceStatus::Present).await?;
        let excused = count_status(AttendanceStatus::Excused).await?;
        let sick = count_status(AttendanceStatus::Sick).await?;

        let enrolled: Vec<_> = class_sections::Entity::find()
            .filter(
                class_sections::Column::Id.in_subquery(
                    sea_orm::sea_query::Query::select()
                        .column(enrollments::Column::ClassId)
                        .from(enrollments::Entity)
                        .and_where(enrollments::Column::StudentId.eq(student_id))
                        .and_where(enrollments::Column::Active.eq(true))
                        .to_owned(),
                ),
            )
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query classes failed: {e}")))?
            .into_iter()
            .map(|m| m.into_class_section())
            .collect();

        let enrolled_classes = self.attach_class_relations(enrolled).await?;

        Ok(StudentDashboard {
            total_records,
            hadir,
            excused,
            sick,
            hadir_percentage: percentage(hadir, total_records),
            enrolled_classes,
        })
    }
}
