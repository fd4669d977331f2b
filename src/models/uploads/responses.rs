use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PhotoUploadResponse {
    pub photo_path: String,
    pub size: i64,
    pub content_type: String,
}
