use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::enrollments::requests::EnrollBatchRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn enroll_students(
    service: &EnrollmentService,
    enroll_data: EnrollBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if enroll_data.student_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "student_ids cannot be empty",
        )));
    }

    match storage.get_class_by_id(enroll_data.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to enroll students: {e}"),
                )),
            );
        }
    }

    // Any unknown student rejects the whole batch before a row is written
    for student_id in &enroll_data.student_ids {
        match storage.get_student_by_id(*student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationError,
                    format!("Student {student_id} not found"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to enroll students: {e}"),
                    )),
                );
            }
        }
    }

    match storage
        .enroll_students(enroll_data.class_id, &enroll_data.student_ids)
        .await
    {
        Ok(Some(result)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Enrollment processed successfully",
        ))),
        Ok(None) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CapacityExceeded,
            "Class capacity exceeded",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to enroll students: {e}"),
            )),
        ),
    }
}
