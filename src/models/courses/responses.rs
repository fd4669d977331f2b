use serde::Serialize;

use super::entities::Course;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}
