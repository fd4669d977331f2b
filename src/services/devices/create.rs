use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeviceService;
use crate::models::devices::requests::CreateDeviceRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_device(
    service: &DeviceService,
    device_data: CreateDeviceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if device_data.device_id.trim().is_empty() || device_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Device ID and name cannot be empty",
        )));
    }

    match storage.get_device_by_device_id(&device_data.device_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "Device ID already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create device: {e}"),
                )),
            );
        }
    }

    if let Some(class_id) = device_data.class_id {
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
                        format!("Failed to create device: {e}"),
                    )),
                );
            }
        }
    }

    match storage.create_device(device_data).await {
        Ok(device) => Ok(HttpResponse::Created().json(ApiResponse::success(
            device,
            "Device created successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create device: {e}"),
            )),
        ),
    }
}
