pub mod photo;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

/// Who the uploaded photo belongs to.
#[derive(Debug, Clone, Copy)]
pub enum PhotoOwner {
    Student(i64),
    Lecturer(i64),
}

pub struct UploadService {
    storage: Option<Arc<dyn Storage>>,
}

impl UploadService {
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

    pub async fn upload_photo(
        &self,
        owner: PhotoOwner,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        photo::upload_photo(self, owner, payload, request).await
    }
}
