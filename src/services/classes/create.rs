use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveTime;

use super::ClassService;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};

fn valid_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

pub async fn create_class(
    service: &ClassService,
    class_data: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if !(1..=7).contains(&class_data.day_of_week) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Day of week must be between 1 and 7",
        )));
    }

    if class_data.capacity <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Capacity must be a positive number",
        )));
    }

    if !valid_time(&class_data.start_time) || !valid_time(&class_data.end_time) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Start and end time must use the HH:MM format",
        )));
    }

    match storage.get_course_by_id(class_data.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create class: {e}"),
                )),
            );
        }
    }

    match storage.get_lecturer_by_id(class_data.lecturer_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                "Lecturer not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create class: {e}"),
                )),
            );
        }
    }

    match storage.create_class(class_data).await {
        Ok(class) => Ok(HttpResponse::Created().json(ApiResponse::success(
            class,
            "Class created successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create class: {e}"),
            )),
        ),
    }
}
