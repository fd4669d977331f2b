use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::models::accounts::{
    entities::{AccountRole, ProfileRef},
    requests::CreateAccountRequest,
};
use crate::models::lecturers::requests::CreateLecturerRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_institution_id};

pub async fn create_lecturer(
    service: &LecturerService,
    lecturer_data: CreateLecturerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_institution_id(&lecturer_data.nidn) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_email(&lecturer_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if lecturer_data.full_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Full name must not be empty",
        )));
    }

    match storage.get_lecturer_by_nidn(&lecturer_data.nidn).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "NIDN already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create lecturer: {e}"),
                )),
            );
        }
    }

    match storage.get_lecturer_by_email(&lecturer_data.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create lecturer: {e}"),
                )),
            );
        }
    }

    let create_account = lecturer_data.create_account;
    let nidn = lecturer_data.nidn.clone();
    let email = lecturer_data.email.clone();

    if create_account {
        match storage.get_account_by_username_or_email(&nidn).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::Conflict,
                    "Username already exists",
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to create lecturer: {e}"),
                    )),
                );
            }
        }
    }

    let lecturer = match storage.create_lecturer(lecturer_data).await {
        Ok(lecturer) => lecturer,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create lecturer: {e}"),
                )),
            );
        }
    };

    if create_account {
        let password_hash = match hash_password(&nidn) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!(
                    "Password hashing failed for lecturer {}: {}",
                    lecturer.id,
                    e
                );
                return Ok(HttpResponse::Created().json(ApiResponse::success(
                    lecturer,
                    "Lecturer created, but account bootstrap failed",
                )));
            }
        };

        let account = CreateAccountRequest {
            username: nidn,
            email,
            password_hash,
            role: AccountRole::Lecturer,
            profile: ProfileRef::Lecturer(lecturer.id),
            must_change_password: true,
        };

        if let Err(e) = storage.create_account(account).await {
            tracing::error!(
                "Account bootstrap failed for lecturer {}: {}",
                lecturer.id,
                e
            );
            return Ok(HttpResponse::Created().json(ApiResponse::success(
                lecturer,
                "Lecturer created, but account bootstrap failed",
            )));
        }
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        lecturer,
        "Lecturer created successfully",
    )))
}
