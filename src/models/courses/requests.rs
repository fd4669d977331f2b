use crate::models::common::PaginationQuery;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CourseQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub semester: Option<i32>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub semester: i32,
    pub department: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credits: Option<i32>,
    pub semester: Option<i32>,
    pub department: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub semester: Option<i32>,
    pub department: Option<String>,
}
