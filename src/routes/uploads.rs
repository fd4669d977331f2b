use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::AccountRole;
use crate::services::uploads::{PhotoOwner, UploadService};
use crate::utils::SafeIdI64;

static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

pub async fn upload_student_photo(
    req: HttpRequest,
    student_id: SafeIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE
        .upload_photo(PhotoOwner::Student(student_id.0), payload, &req)
        .await
}

pub async fn upload_lecturer_photo(
    req: HttpRequest,
    lecturer_id: SafeIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE
        .upload_photo(PhotoOwner::Lecturer(lecturer_id.0), payload, &req)
        .await
}

pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/upload")
            .wrap(middlewares::RateLimit::file_upload())
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(
                        AccountRole::lecturer_roles(),
                    ))
                    .route("/mahasiswa/{id}", web::post().to(upload_student_photo))
                    .route("/dosen/{id}", web::post().to(upload_lecturer_photo)),
            ),
    );
}
