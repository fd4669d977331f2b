use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::AccountRole;
use crate::models::lecturers::requests::{
    CreateLecturerRequest, LecturerQueryParams, UpdateLecturerRequest,
};
use crate::services::lecturers::LecturerService;
use crate::utils::SafeIdI64;

static LECTURER_SERVICE: Lazy<LecturerService> = Lazy::new(LecturerService::new_lazy);

pub async fn list_lecturers(
    req: HttpRequest,
    query: web::Query<LecturerQueryParams>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE
        .list_lecturers(query.into_inner(), &req)
        .await
}

pub async fn create_lecturer(
    req: HttpRequest,
    lecturer_data: web::Json<CreateLecturerRequest>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE
        .create_lecturer(lecturer_data.into_inner(), &req)
        .await
}

pub async fn get_lecturer(req: HttpRequest, lecturer_id: SafeIdI64) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE.get_lecturer(lecturer_id.0, &req).await
}

pub async fn update_lecturer(
    req: HttpRequest,
    lecturer_id: SafeIdI64,
    update_data: web::Json<UpdateLecturerRequest>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE
        .update_lecturer(lecturer_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_lecturer(
    req: HttpRequest,
    lecturer_id: SafeIdI64,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE.delete_lecturer(lecturer_id.0, &req).await
}

pub fn configure_lecturer_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/dosen")
            .wrap(middlewares::RequireRole::new_any(AccountRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_lecturers))
            .route("", web::post().to(create_lecturer))
            .route("/{id}", web::get().to(get_lecturer))
            .route("/{id}", web::put().to(update_lecturer))
            .route("/{id}", web::delete().to(delete_lecturer)),
    );
}
