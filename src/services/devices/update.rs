use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeviceService;
use crate::models::devices::requests::UpdateDeviceRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_device(
    service: &DeviceService,
    device_id: i64,
    update_data: UpdateDeviceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(class_id) = update_data.class_id {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationError,
                    "Class not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to update device: {e}"),
                    )),
                );
            }
        }
    }

    match storage.update_device(device_id, update_data).await {
        Ok(Some(device)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            device,
            "Device updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Device not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update device: {e}"),
            )),
        ),
    }
}
