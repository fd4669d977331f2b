use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::models::lecturers::requests::UpdateLecturerRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_email, validate_institution_id};

pub async fn update_lecturer(
    service: &LecturerService,
    lecturer_id: i64,
    update_data: UpdateLecturerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref nidn) = update_data.nidn {
        if let Err(msg) = validate_institution_id(nidn) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
        match storage.get_lecturer_by_nidn(nidn).await {
            Ok(Some(existing)) if existing.id != lecturer_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::Conflict,
                    "NIDN already exists",
                )));
            }
            Ok(_) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to update lecturer: {e}"),
                    )),
                );
            }
        }
    }

    if let Some(ref email) = update_data.email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
        match storage.get_lecturer_by_email(email).await {
            Ok(Some(existing)) if existing.id != lecturer_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::Conflict,
                    "Email already exists",
                )));
            }
            Ok(_) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to update lecturer: {e}"),
                    )),
                );
            }
        }
    }

    match storage.update_lecturer(lecturer_id, update_data).await {
        Ok(Some(lecturer)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lecturer,
            "Lecturer updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Lecturer not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update lecturer: {e}"),
            )),
        ),
    }
}
