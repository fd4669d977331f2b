use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};
use uuid::Uuid;

use super::{PhotoOwner, UploadService};
use crate::config::AppConfig;
use crate::errors::SiabsenError;
use crate::models::{ApiResponse, ErrorCode, uploads::responses::PhotoUploadResponse};
use crate::utils::validate_image_magic_bytes;

pub async fn upload_photo(
    service: &UploadService,
    owner: PhotoOwner,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let storage = service.get_storage(request);

    // The profile row must exist before we accept any bytes
    let owner_exists = match owner {
        PhotoOwner::Student(id) => storage.get_student_by_id(id).await.map(|s| s.is_some()),
        PhotoOwner::Lecturer(id) => storage.get_lecturer_by_id(id).await.map(|l| l.is_some()),
    };
    match owner_exists {
        Ok(true) => {}
        Ok(false) => {
            let message = match owner {
                PhotoOwner::Student(_) => "Student not found",
                PhotoOwner::Lecturer(_) => "Lecturer not found",
            };
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::NotFound, message)));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UploadFailed,
                    format!("Failed to upload photo: {e}"),
                )),
            );
        }
    }

    // Files land under a per-field subdirectory of the upload root
    let field_dir = format!("{upload_dir}/photo");
    if !Path::new(&field_dir).exists()
        && let Err(e) = fs::create_dir_all(&field_dir)
    {
        tracing::error!("{}", SiabsenError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UploadFailed,
                "Failed to create upload directory",
            )),
        );
    }

    let mut file_uploaded = false;
    let mut file_size: i64 = 0;
    let mut file_type = String::new();
    let mut stored_name = String::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "photo" {
            if file_uploaded {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationError,
                    "Only one photo can be uploaded at a time",
                )));
            }
            file_uploaded = true;

            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            let extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();

            if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "File type not allowed",
                )));
            }

            file_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_default();

            stored_name = format!("{}{}", Uuid::new_v4(), extension);
            let file_path = format!("{field_dir}/{stored_name}");
            let mut f = match File::create(&file_path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::error!("{}", SiabsenError::file_operation(format!("{e}")));
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(ErrorCode::UploadFailed, "Failed to create file"),
                    ));
                }
            };

            let mut total_size: usize = 0;
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // The magic bytes in the first chunk must match the extension
                if first_chunk {
                    first_chunk = false;
                    if !validate_image_magic_bytes(&data, &extension) {
                        let _ = fs::remove_file(&file_path);
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileTypeNotAllowed,
                            "File content does not match its extension",
                        )));
                    }
                }

                total_size += data.len();
                if total_size > max_size {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTooLarge,
                        "File size exceeds the limit",
                    )));
                }
                f.write_all(&data)?;
            }
            file_size = total_size as i64;
        }
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "No photo found in upload payload",
        )));
    }

    let photo_path = format!("{field_dir}/{stored_name}");
    let updated = match owner {
        PhotoOwner::Student(id) => storage.update_student_photo(id, &photo_path).await,
        PhotoOwner::Lecturer(id) => storage.update_lecturer_photo(id, &photo_path).await,
    };

    match updated {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PhotoUploadResponse {
                photo_path,
                size: file_size,
                content_type: file_type,
            },
            "Photo uploaded successfully",
        ))),
        Ok(false) => {
            let _ = fs::remove_file(&photo_path);
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Profile no longer exists",
            )))
        }
        Err(e) => {
            let _ = fs::remove_file(&photo_path);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UploadFailed,
                    format!("Failed to upload photo: {e}"),
                )),
            )
        }
    }
}
