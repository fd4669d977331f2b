use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if course_data.code.trim().is_empty() || course_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Course code and name must not be empty",
        )));
    }
    if course_data.credits <= 0 || course_data.semester <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Credits and semester must be positive",
        )));
    }

    // Duplicate course codes answer 400, matching the kiosk frontends that
    // surface this message verbatim
    match storage.get_course_by_code(&course_data.code).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                "Kode mata kuliah already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create course: {e}"),
                )),
            );
        }
    }

    match storage.create_course(course_data).await {
        Ok(course) => Ok(HttpResponse::Created().json(ApiResponse::success(
            course,
            "Course created successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create course: {e}"),
            )),
        ),
    }
}
