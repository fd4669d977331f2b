use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub class_id: i64,
    pub student_id: i64,
    pub active: bool,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

/// Roster row: enrollment plus the student it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentWithStudent {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub student: crate::models::students::entities::Student,
}
