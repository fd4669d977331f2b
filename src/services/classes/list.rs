use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::middlewares::AuthContext;
use crate::models::accounts::entities::AccountRole;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::requests::{ClassListQuery, ClassQueryParams},
};

pub async fn list_classes(
    service: &ClassService,
    query: ClassQueryParams,
    auth: &AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // Admins browse freely; lecturers see their own sections, students the
    // sections they are actively enrolled in.
    let (lecturer_id, enrolled_student_id) = match auth.role() {
        AccountRole::Admin => (query.lecturer_id, None),
        AccountRole::Lecturer => match auth.lecturer_id() {
            Some(id) => (Some(id), None),
            None => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Account has no lecturer profile",
                )));
            }
        },
        AccountRole::Student => match auth.student_id() {
            Some(id) => (query.lecturer_id, Some(id)),
            None => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Account has no student profile",
                )));
            }
        },
    };

    let list_query = ClassListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        course_id: query.course_id,
        lecturer_id,
        academic_year: query.academic_year,
        enrolled_student_id,
    };

    match storage.list_classes_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success_paginated(
            response.items,
            response.pagination,
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve class list: {e}"),
            )),
        ),
    }
}
