use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AttendanceService, forbidden_response, owns_session};
use crate::middlewares::AuthContext;
use crate::models::attendance::entities::SessionStatus;
use crate::models::attendance::requests::ManualMarkRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn manual_mark(
    service: &AttendanceService,
    session_id: i64,
    mark_data: ManualMarkRequest,
    auth: &AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if !mark_data.status.is_manual() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Manual marking only accepts excused or sick",
        )));
    }

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
                    format!("Failed to mark attendance: {e}"),
                )),
            );
        }
    };

    if !owns_session(auth, &session) {
        return Ok(forbidden_response());
    }

    if session.status != SessionStatus::Active {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SessionNotActive,
            "Session is not active",
        )));
    }

    let enrolled = match storage.active_student_ids(session.class_id).await {
        Ok(ids) => ids.contains(&mark_data.student_id),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to mark attendance: {e}"),
                )),
            );
        }
    };

    if !enrolled {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "Student is not actively enrolled in this class",
        )));
    }

    match storage
        .manual_mark(
            session_id,
            mark_data.student_id,
            mark_data.status,
            mark_data.note,
        )
        .await
    {
        Ok(Some(record)) => {
            info!(
                session_id,
                student_id = mark_data.student_id,
                status = %mark_data.status,
                "attendance marked manually"
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Attendance marked successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AlreadyRecorded,
            "Student already has a record in this session",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to mark attendance: {e}"),
            )),
        ),
    }
}
