use serde::Serialize;

use super::entities::EnrollmentWithStudent;

/// Per-item outcome of a batch enrollment. The batch is not atomic once the
/// capacity gate passes: each student succeeds or fails independently.
#[derive(Debug, Serialize)]
pub struct EnrollBatchResponse {
    pub enrolled: i64,
    pub reactivated: i64,
    pub skipped: i64,
    pub errors: Vec<EnrollItemError>,
}

#[derive(Debug, Serialize)]
pub struct EnrollItemError {
    pub student_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ClassRosterResponse {
    pub class_id: i64,
    pub total: i64,
    pub items: Vec<EnrollmentWithStudent>,
}
