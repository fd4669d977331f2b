use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::config::AppConfig;
use crate::middlewares::AuthContext;
use crate::models::accounts::entities::AccountRole;
use crate::models::attendance::requests::StartSessionRequest;
use crate::models::attendance::responses::StartSessionResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::generate_session_code;

const CODE_RETRY_LIMIT: usize = 5;

pub async fn start_session(
    service: &AttendanceService,
    session_data: StartSessionRequest,
    auth: &AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    if session_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Session title cannot be empty",
        )));
    }

    let max_duration = config.attendance.max_duration_minutes;
    if session_data.duration_minutes <= 0 || session_data.duration_minutes > max_duration {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("Duration must be between 1 and {max_duration} minutes"),
        )));
    }

    let class = match storage.get_class_by_id(session_data.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to start session: {e}"),
                )),
            );
        }
    };

    // Lecturers only open sessions for classes they teach
    let lecturer_id = match auth.role() {
        AccountRole::Admin => class.lecturer_id,
        _ => match auth.lecturer_id() {
            Some(id) if id == class.lecturer_id => id,
            _ => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "You do not teach this class",
                )));
            }
        },
    };

    let device = match storage
        .get_device_by_device_id(&session_data.device_id)
        .await
    {
        Ok(Some(device)) => device,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Device not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to start session: {e}"),
                )),
            );
        }
    };

    if !device.active {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DeviceInactive,
            "Device is inactive",
        )));
    }

    // A session opening on the device doubles as a liveness signal
    if let Err(e) = storage.record_heartbeat(&session_data.device_id).await {
        tracing::warn!("heartbeat refresh failed: {e}");
    }

    // Session codes collide rarely; retry a handful of times before giving up
    let mut code = generate_session_code(config.attendance.session_code_length);
    for _ in 0..CODE_RETRY_LIMIT {
        match storage
            .start_session(
                class.id,
                lecturer_id,
                device.id,
                &session_data.title,
                session_data.duration_minutes,
                &code,
            )
            .await
        {
            Ok(Some(session)) => {
                info!(
                    session_id = session.id,
                    class_id = class.id,
                    code = %session.code,
                    "attendance session started"
                );
                let expected_end = session.expected_end();
                return Ok(HttpResponse::Created().json(ApiResponse::success(
                    StartSessionResponse {
                        session,
                        expected_end,
                    },
                    "Session started successfully",
                )));
            }
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::SessionAlreadyActive,
                    "There is already an active session for this class",
                )));
            }
            Err(e) if e.to_string().to_lowercase().contains("unique") => {
                code = generate_session_code(config.attendance.session_code_length);
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to start session: {e}"),
                    )),
                );
            }
        }
    }

    Ok(
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "Failed to generate a unique session code",
        )),
    )
}
