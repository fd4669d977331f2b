pub mod create;
pub mod delete;
pub mod get;
pub mod heartbeat;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::devices::requests::{
    CreateDeviceRequest, DeviceQueryParams, UpdateDeviceRequest,
};
use crate::storage::Storage;

pub struct DeviceService {
    storage: Option<Arc<dyn Storage>>,
}

impl DeviceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_devices(
        &self,
        query: DeviceQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_devices(self, query, request).await
    }

    pub async fn get_device(
        &self,
        device_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_device(self, device_id, request).await
    }

    pub async fn create_device(
        &self,
        device_data: CreateDeviceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_device(self, device_data, request).await
    }

    pub async fn update_device(
        &self,
        device_id: i64,
        update_data: UpdateDeviceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_device(self, device_id, update_data, request).await
    }

    pub async fn delete_device(
        &self,
        device_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_device(self, device_id, request).await
    }

    pub async fn record_heartbeat(
        &self,
        device_id: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        heartbeat::record_heartbeat(self, device_id, request).await
    }
}
