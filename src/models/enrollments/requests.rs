use serde::Deserialize;

/// Batch enrollment of students into one class.
#[derive(Debug, Deserialize)]
pub struct EnrollBatchRequest {
    pub class_id: i64,
    pub student_ids: Vec<i64>,
}
