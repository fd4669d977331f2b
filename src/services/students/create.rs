use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::accounts::{
    entities::{AccountRole, ProfileRef},
    requests::CreateAccountRequest,
};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_institution_id};

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_institution_id(&student_data.nim) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_email(&student_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if student_data.full_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Full name must not be empty",
        )));
    }

    match storage.get_student_by_nim(&student_data.nim).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "NIM already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create student: {e}"),
                )),
            );
        }
    }

    match storage.get_student_by_email(&student_data.email).await {
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
                    format!("Failed to create student: {e}"),
                )),
            );
        }
    }

    let create_account = student_data.create_account;
    let nim = student_data.nim.clone();
    let email = student_data.email.clone();

    // The NIM doubles as username of the bootstrapped account; reject early
    // when it is taken
    if create_account {
        match storage.get_account_by_username_or_email(&nim).await {
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
                        format!("Failed to create student: {e}"),
                    )),
                );
            }
        }
    }

    let student = match storage.create_student(student_data).await {
        Ok(student) => student,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create student: {e}"),
                )),
            );
        }
    };

    if create_account {
        // Initial password is the NIM; the account must rotate it on first
        // login
        let password_hash = match hash_password(&nim) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!("Password hashing failed for student {}: {}", student.id, e);
                return Ok(HttpResponse::Created().json(ApiResponse::success(
                    student,
                    "Student created, but account bootstrap failed",
                )));
            }
        };

        let account = CreateAccountRequest {
            username: nim,
            email,
            password_hash,
            role: AccountRole::Student,
            profile: ProfileRef::Student(student.id),
            must_change_password: true,
        };

        if let Err(e) = storage.create_account(account).await {
            tracing::error!("Account bootstrap failed for student {}: {}", student.id, e);
            return Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created, but account bootstrap failed",
            )));
        }
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        student,
        "Student created successfully",
    )))
}
