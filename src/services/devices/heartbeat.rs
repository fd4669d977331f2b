use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeviceService;
use crate::models::devices::responses::HeartbeatResponse;
use crate::models::{ApiResponse, ErrorCode};

/// Device-facing endpoint, authenticated only by knowing a registered
/// device identifier.
pub async fn record_heartbeat(
    service: &DeviceService,
    device_id: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.record_heartbeat(device_id).await {
        Ok(Some(device)) => {
            let response = HeartbeatResponse {
                device_id: device.device_id,
                online: device.online,
                last_heartbeat: device.last_heartbeat.unwrap_or_else(chrono::Utc::now),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Heartbeat recorded")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Device not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to record heartbeat: {e}"),
            )),
        ),
    }
}
