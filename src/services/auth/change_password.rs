use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::AuthContext;
use crate::models::{ApiResponse, ErrorCode, accounts::requests::ChangePasswordRequest};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

use super::AuthService;

/// Password rotation. Succeeding also clears the must_change_password flag
/// set on bootstrapped accounts.
pub async fn handle_change_password(
    service: &AuthService,
    auth: AuthContext,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if !verify_password(
        &change_request.current_password,
        &auth.account.password_hash,
    ) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::InvalidCredentials,
            "Current password is incorrect",
        )));
    }

    if let Err(msg) = validate_password_simple(&change_request.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    if change_request.new_password == change_request.current_password {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "New password must differ from the current password",
        )));
    }

    let password_hash = match hash_password(&change_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Password change failed",
                )),
            );
        }
    };

    match storage.update_password(auth.account.id, &password_hash).await {
        Ok(true) => {
            tracing::info!("Account {} changed password", auth.account.id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Password changed successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Account not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Password change failed: {e}"),
            )),
        ),
    }
}
