use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::accounts::{entities::AccountStatus, responses::RefreshTokenResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

/// Mints a fresh access token from the refresh cookie. The account is
/// reloaded so a deactivated account cannot refresh its way back in.
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let storage = service.get_storage(request);

    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let claims = match jwt::JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();
            return Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                ),
            ));
        }
    };

    let account_id = claims.sub.parse::<i64>().unwrap_or(0);
    let account = match storage.get_account_by_id(account_id).await {
        Ok(Some(account)) if account.status == AccountStatus::Active => account,
        Ok(_) => {
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();
            return Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(ErrorCode::Unauthorized, "Account no longer valid"),
            ));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Refresh failed: {e}"),
                )),
            );
        }
    };

    match jwt::JwtUtils::generate_access_token(&account.token_identity()) {
        Ok(access_token) => {
            let response = RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to generate access token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Refresh failed, unable to generate token",
                )),
            )
        }
    }
}

/// Clears the refresh cookie; the access token simply ages out.
pub async fn handle_logout(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();
    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
