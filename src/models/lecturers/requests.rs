use crate::models::common::PaginationQuery;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LecturerQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLecturerRequest {
    pub nidn: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub create_account: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLecturerRequest {
    pub nidn: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LecturerListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub department: Option<String>,
}
