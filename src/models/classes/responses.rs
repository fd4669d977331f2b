use serde::Serialize;

use super::entities::ClassSectionDetail;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct ClassListResponse {
    pub items: Vec<ClassSectionDetail>,
    pub pagination: PaginationInfo,
}
