use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::AuthContext;
use crate::models::{ApiResponse, ErrorCode, accounts::responses::MeResponse};

use super::AuthService;

/// Current account with its resolved profile row.
pub async fn handle_me(
    service: &AuthService,
    auth: AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut student = None;
    let mut lecturer = None;

    if let Some(student_id) = auth.student_id() {
        student = match storage.get_student_by_id(student_id).await {
            Ok(student) => student,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to load profile: {e}"),
                    )),
                );
            }
        };
    }

    if let Some(lecturer_id) = auth.lecturer_id() {
        lecturer = match storage.get_lecturer_by_id(lecturer_id).await {
            Ok(lecturer) => lecturer,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to load profile: {e}"),
                    )),
                );
            }
        };
    }

    let response = MeResponse {
        account: auth.account,
        student,
        lecturer,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Account information retrieved successfully",
    )))
}
