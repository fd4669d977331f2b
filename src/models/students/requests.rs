use crate::models::common::PaginationQuery;
use serde::Deserialize;

// Query parameters from the HTTP request
#[derive(Debug, Deserialize)]
pub struct StudentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub department: Option<String>,
}

// Creating a student can also bootstrap a login account; the NIM doubles as
// username and initial password, and the account is flagged for forced
// password rotation.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub nim: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub create_account: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub nim: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// Storage-layer list query
#[derive(Debug, Clone)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub department: Option<String>,
}
