use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, forbidden_response, owns_session};
use crate::middlewares::AuthContext;
use crate::models::{ApiResponse, ErrorCode};

pub async fn session_detail(
    service: &AttendanceService,
    session_id: i64,
    auth: &AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.session_detail(session_id).await {
        Ok(Some(detail)) => {
            if !owns_session(auth, &detail.session) {
                return Ok(forbidden_response());
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Session detail retrieved successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Session not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve session detail: {e}"),
            )),
        ),
    }
}
