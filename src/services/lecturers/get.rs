use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_lecturer(
    service: &LecturerService,
    lecturer_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_lecturer_by_id(lecturer_id).await {
        Ok(Some(lecturer)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lecturer,
            "Lecturer retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Lecturer not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve lecturer: {e}"),
            )),
        ),
    }
}
