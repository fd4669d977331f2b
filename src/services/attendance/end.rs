use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AttendanceService, forbidden_response, owns_session};
use crate::middlewares::AuthContext;
use crate::models::attendance::entities::SessionStatus;
use crate::models::{ApiResponse, ErrorCode};

/// Shared close path for stop (`completed`) and cancel (`cancelled`).
pub async fn end_session(
    service: &AttendanceService,
    session_id: i64,
    status: SessionStatus,
    auth: &AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let session = match storage.get_session_by_id(session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Session not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to end session: {e}"),
                )),
            );
        }
    };

    if !owns_session(auth, &session) {
        return Ok(forbidden_response());
    }

    match storage.end_session(session_id, status).await {
        Ok(Some(session)) => {
            info!(session_id = session.id, status = %status, "attendance session closed");
            let message = match status {
                SessionStatus::Cancelled => "Session cancelled successfully",
                _ => "Session stopped successfully",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(session, message)))
        }
        Ok(None) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SessionNotActive,
            "Session is not active",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to end session: {e}"),
            )),
        ),
    }
}
