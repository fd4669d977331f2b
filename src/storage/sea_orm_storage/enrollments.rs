use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::{class_sections, students};
use crate::errors::{Result, SiabsenError};
use crate::models::enrollments::{
    entities::EnrollmentWithStudent,
    responses::{ClassRosterResponse, EnrollBatchResponse, EnrollItemError},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// Batch enrollment. The capacity check and every row change share one
    /// transaction, so two concurrent batches cannot both squeeze past the
    /// limit. Returns None when the batch would overflow the class.
    pub async fn enroll_students_impl(
        &self,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<Option<EnrollBatchResponse>> {
        let txn = self.db.begin().await.map_err(|e| {
            SiabsenError::database_operation(format!("Begin transaction failed: {e}"))
        })?;

        let Some(class) = class_sections::Entity::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query class failed: {e}")))?
        else {
            txn.rollback().await.ok();
            return Err(SiabsenError::not_found(format!(
                "Class {class_id} not found"
            )));
        };

        let active_count = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Active.eq(true))
            .count(&txn)
            .await
            .map_err(|e| {
                SiabsenError::database_operation(format!("Count enrollments failed: {e}"))
            })? as i64;

        // Existing enrollments for the requested students
        let existing: HashMap<i64, crate::entity::enrollments::Model> = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.is_in(student_ids.to_vec()))
            .all(&txn)
            .await
            .map_err(|e| {
                SiabsenError::database_operation(format!("Query enrollments failed: {e}"))
            })?
            .into_iter()
            .map(|m| (m.student_id, m))
            .collect();

        let mut candidates: Vec<i64> = student_ids.to_vec();
        candidates.sort_unstable();
        candidates.dedup();

        // Capacity gate counts the requested batch as a whole: E already
        // active plus N requested must fit, even when some of the N are
        // already enrolled.
        if active_count + candidates.len() as i64 > class.capacity as i64 {
            txn.rollback().await.ok();
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut enrolled = 0;
        let mut reactivated = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();

        for student_id in candidates {
            match existing.get(&student_id) {
                Some(row) if row.active => {
                    skipped += 1;
                    errors.push(EnrollItemError {
                        student_id,
                        message: "Student is already actively enrolled".to_string(),
                    });
                }
                Some(row) => {
                    let mut model = row.clone().into_active_model();
                    model.active = Set(true);
                    model.enrolled_at = Set(now);
                    model.update(&txn).await.map_err(|e| {
                        SiabsenError::database_operation(format!(
                            "Reactivate enrollment failed: {e}"
                        ))
                    })?;
                    reactivated += 1;
                }
                None => {
                    let student_exists = students::Entity::find_by_id(student_id)
                        .one(&txn)
                        .await
                        .map_err(|e| {
                            SiabsenError::database_operation(format!("Query student failed: {e}"))
                        })?
                        .is_some();

                    if !student_exists {
                        errors.push(EnrollItemError {
                            student_id,
                            message: "Student not found".to_string(),
                        });
                        continue;
                    }

                    let model = ActiveModel {
                        class_id: Set(class_id),
                        student_id: Set(student_id),
                        active: Set(true),
                        enrolled_at: Set(now),
                        ..Default::default()
                    };
                    model.insert(&txn).await.map_err(|e| {
                        SiabsenError::database_operation(format!("Create enrollment failed: {e}"))
                    })?;
                    enrolled += 1;
                }
            }
        }

        txn.commit().await.map_err(|e| {
            SiabsenError::database_operation(format!("Commit enrollments failed: {e}"))
        })?;

        Ok(Some(EnrollBatchResponse {
            enrolled,
            reactivated,
            skipped,
            errors,
        }))
    }

    /// Active roster of one class, including student profiles.
    pub async fn class_roster_impl(&self, class_id: i64) -> Result<ClassRosterResponse> {
        let rows = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Active.eq(true))
            .find_also_related(students::Entity)
            .order_by_asc(students::Column::Nim)
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query roster failed: {e}")))?;

        let items: Vec<EnrollmentWithStudent> = rows
            .into_iter()
            .filter_map(|(enrollment, student)| {
                student.map(|s| EnrollmentWithStudent {
                    enrollment: enrollment.into_enrollment(),
                    student: s.into_student(),
                })
            })
            .collect();

        Ok(ClassRosterResponse {
            class_id,
            total: items.len() as i64,
            items,
        })
    }

    /// Soft removal: the row survives with active = false, so history keeps
    /// pointing at a real enrollment.
    pub async fn deactivate_enrollment_impl(&self, enrollment_id: i64) -> Result<bool> {
        let result = Enrollments::update_many()
            .col_expr(Column::Active, sea_orm::sea_query::Expr::value(false))
            .filter(Column::Id.eq(enrollment_id))
            .filter(Column::Active.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SiabsenError::database_operation(format!("Deactivate enrollment failed: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    pub async fn active_student_ids_impl(&self, class_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Active.eq(true))
            .select_only()
            .column(Column::StudentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                SiabsenError::database_operation(format!("Query enrollments failed: {e}"))
            })?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{seed_class, seed_student, storage};

    #[tokio::test]
    async fn test_capacity_counts_the_requested_batch() {
        let storage = storage().await;
        let (class_id, _) = seed_class(&storage, 2).await;
        let s1 = seed_student(&storage, "2101001").await;
        let s2 = seed_student(&storage, "2101002").await;

        let first = storage
            .enroll_students_impl(class_id, &[s1, s2])
            .await
            .expect("enroll")
            .expect("within capacity");
        assert_eq!(first.enrolled, 2);

        // The class is full. Re-requesting the same two students is still a
        // batch of two against zero free seats, so the whole batch bounces.
        let second = storage
            .enroll_students_impl(class_id, &[s1, s2])
            .await
            .expect("enroll");
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_already_active_student_gets_a_per_item_error() {
        let storage = storage().await;
        let (class_id, _) = seed_class(&storage, 10).await;
        let s1 = seed_student(&storage, "2101003").await;
        let s2 = seed_student(&storage, "2101004").await;

        storage
            .enroll_students_impl(class_id, &[s1])
            .await
            .expect("enroll")
            .expect("within capacity");

        let response = storage
            .enroll_students_impl(class_id, &[s1, s2])
            .await
            .expect("enroll")
            .expect("within capacity");

        assert_eq!(response.enrolled, 1);
        assert_eq!(response.skipped, 1);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].student_id, s1);
        assert!(response.errors[0].message.contains("already"));
    }

    #[tokio::test]
    async fn test_deactivated_enrollment_is_reactivated() {
        let storage = storage().await;
        let (class_id, _) = seed_class(&storage, 5).await;
        let s1 = seed_student(&storage, "2101005").await;

        let first = storage
            .enroll_students_impl(class_id, &[s1])
            .await
            .expect("enroll")
            .expect("within capacity");
        assert_eq!(first.enrolled, 1);

        let roster = storage
            .class_roster_impl(class_id)
            .await
            .expect("roster");
        let enrollment_id = roster.items[0].enrollment.id;
        assert!(storage
            .deactivate_enrollment_impl(enrollment_id)
            .await
            .expect("deactivate"));

        let again = storage
            .enroll_students_impl(class_id, &[s1])
            .await
            .expect("enroll")
            .expect("within capacity");
        assert_eq!(again.reactivated, 1);
        assert_eq!(again.enrolled, 0);
    }
}
