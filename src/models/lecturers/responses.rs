use serde::Serialize;

use super::entities::Lecturer;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct LecturerListResponse {
    pub items: Vec<Lecturer>,
    pub pagination: PaginationInfo,
}
