use crate::models::common::PaginationQuery;
use serde::Deserialize;

use super::entities::Term;

#[derive(Debug, Deserialize)]
pub struct ClassQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub course_id: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub course_id: i64,
    pub lecturer_id: i64,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub capacity: i32,
    pub academic_year: String,
    pub term: Term,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClassRequest {
    pub course_id: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room: Option<String>,
    pub capacity: Option<i32>,
    pub academic_year: Option<String>,
    pub term: Option<Term>,
}

#[derive(Debug, Clone)]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub course_id: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub academic_year: Option<String>,
    /// Restrict to classes a student is actively enrolled in.
    pub enrolled_student_id: Option<i64>,
}
