use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    accounts::{
        entities::ProfileRef,
        requests::{CreateAccountRequest, RegisterAccountRequest},
    },
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

/// Admin-driven account registration. Accounts created for someone else are
/// flagged for password rotation on first login.
pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterAccountRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    let profile = register_request.profile.unwrap_or(ProfileRef::None);

    // The profile row must exist and must not already have an account
    match &profile {
        ProfileRef::Student(id) => match storage.get_student_by_id(*id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationError,
                    format!("Student {id} not found"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Registration failed: {e}"),
                    )),
                );
            }
        },
        ProfileRef::Lecturer(id) => match storage.get_lecturer_by_id(*id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationError,
                    format!("Lecturer {id} not found"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Registration failed: {e}"),
                    )),
                );
            }
        },
        ProfileRef::None => {}
    }

    if profile != ProfileRef::None {
        match storage.get_account_by_profile(&profile).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::Conflict,
                    "Profile already has an account",
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Registration failed: {e}"),
                    )),
                );
            }
        }
    }

    for identifier in [&register_request.username, &register_request.email] {
        match storage.get_account_by_username_or_email(identifier).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::Conflict,
                    "Username or email already exists",
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Registration failed: {e}"),
                    )),
                );
            }
        }
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            );
        }
    };

    let create = CreateAccountRequest {
        username: register_request.username,
        email: register_request.email,
        password_hash,
        role: register_request.role,
        profile,
        must_change_password: true,
    };

    match storage.create_account(create).await {
        Ok(account) => {
            tracing::info!("Account {} registered", account.username);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(account, "Account created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Registration failed: {e}"),
            )),
        ),
    }
}
