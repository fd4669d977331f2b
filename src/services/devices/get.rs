use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeviceService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_device(
    service: &DeviceService,
    device_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_device_by_id(device_id).await {
        Ok(Some(device)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            device,
            "Device retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Device not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve device: {e}"),
            )),
        ),
    }
}
