use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::AccountRole;
use crate::models::devices::requests::{
    CreateDeviceRequest, DeviceQueryParams, UpdateDeviceRequest,
};
use crate::services::devices::DeviceService;
use crate::utils::{SafeDeviceId, SafeIdI64};

static DEVICE_SERVICE: Lazy<DeviceService> = Lazy::new(DeviceService::new_lazy);

pub async fn list_devices(
    req: HttpRequest,
    query: web::Query<DeviceQueryParams>,
) -> ActixResult<HttpResponse> {
    DEVICE_SERVICE.list_devices(query.into_inner(), &req).await
}

pub async fn create_device(
    req: HttpRequest,
    device_data: web::Json<CreateDeviceRequest>,
) -> ActixResult<HttpResponse> {
    DEVICE_SERVICE
        .create_device(device_data.into_inner(), &req)
        .await
}

pub async fn get_device(req: HttpRequest, device_id: SafeIdI64) -> ActixResult<HttpResponse> {
    DEVICE_SERVICE.get_device(device_id.0, &req).await
}

pub async fn update_device(
    req: HttpRequest,
    device_id: SafeIdI64,
    update_data: web::Json<UpdateDeviceRequest>,
) -> ActixResult<HttpResponse> {
    DEVICE_SERVICE
        .update_device(device_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_device(req: HttpRequest, device_id: SafeIdI64) -> ActixResult<HttpResponse> {
    DEVICE_SERVICE.delete_device(device_id.0, &req).await
}

pub async fn record_heartbeat(
    req: HttpRequest,
    device_id: SafeDeviceId,
) -> ActixResult<HttpResponse> {
    DEVICE_SERVICE.record_heartbeat(&device_id.0, &req).await
}

pub fn configure_device_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/devices")
            // Device-trusted ping, no JWT: the unit only knows its own id
            .service(
                web::resource("/{device_id}/heartbeat")
                    .wrap(middlewares::RateLimit::heartbeat())
                    .route(web::post().to(record_heartbeat)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(AccountRole::admin_roles()))
                    .wrap(middlewares::RequireJWT)
                    .route("", web::get().to(list_devices))
                    .route("", web::post().to(create_device))
                    .route("/{id}", web::get().to(get_device))
                    .route("/{id}", web::put().to(update_device))
                    .route("/{id}", web::delete().to(delete_device)),
            ),
    );
}
