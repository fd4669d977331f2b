use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::middlewares::AuthContext;
use crate::models::accounts::entities::AccountRole;
use crate::models::{ApiResponse, ErrorCode};

/// One endpoint, three shapes: the caller's role picks the dashboard.
pub async fn dashboard(
    service: &ReportService,
    auth: &AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match auth.role() {
        AccountRole::Admin => storage
            .admin_dashboard()
            .await
            .map(|data| HttpResponse::Ok().json(ApiResponse::success(data, "Dashboard retrieved"))),
        AccountRole::Lecturer => {
            let Some(lecturer_id) = auth.lecturer_id() else {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Account has no lecturer profile",
                )));
            };
            storage.lecturer_dashboard(lecturer_id).await.map(|data| {
                HttpResponse::Ok().json(ApiResponse::success(data, "Dashboard retrieved"))
            })
        }
        AccountRole::Student => {
            let Some(student_id) = auth.student_id() else {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Account has no student profile",
                )));
            };
            storage.student_dashboard(student_id).await.map(|data| {
                HttpResponse::Ok().json(ApiResponse::success(data, "Dashboard retrieved"))
            })
        }
    };

    match result {
        Ok(response) => Ok(response),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve dashboard: {e}"),
            )),
        ),
    }
}
