use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::AuthContext;
use crate::models::accounts::entities::AccountRole;
use crate::models::attendance::requests::{SessionListQuery, SessionQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_sessions(
    service: &AttendanceService,
    query: SessionQueryParams,
    auth: &AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // Lecturers see their own sessions; admins see everything
    let lecturer_id = match auth.role() {
        AccountRole::Admin => None,
        _ => match auth.lecturer_id() {
            Some(id) => Some(id),
            None => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Account has no lecturer profile",
                )));
            }
        },
    };

    let list_query = SessionListQuery {
        class_id: query.class_id,
        lecturer_id,
        status: query.status,
    };

    match storage.list_sessions(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response.items,
            "Session list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve session list: {e}"),
            )),
        ),
    }
}
