use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::AccountRole;
use crate::models::enrollments::requests::EnrollBatchRequest;
use crate::services::enrollments::EnrollmentService;
use crate::utils::{SafeClassIdI64, SafeIdI64};

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn enroll_students(
    req: HttpRequest,
    enroll_data: web::Json<EnrollBatchRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll_students(enroll_data.into_inner(), &req)
        .await
}

pub async fn class_roster(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.class_roster(class_id.0, &req).await
}

pub async fn deactivate_enrollment(
    req: HttpRequest,
    enrollment_id: SafeIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .deactivate_enrollment(enrollment_id.0, &req)
        .await
}

pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/enrollment")
            .wrap(middlewares::RequireJWT)
            .route("/kelas/{class_id}", web::get().to(class_roster))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(AccountRole::admin_roles()))
                    .route("/enroll", web::post().to(enroll_students))
                    .route("/{id}", web::delete().to(deactivate_enrollment)),
            ),
    );
}
