use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, AuthContext};
use crate::models::accounts::entities::AccountRole;
use crate::models::attendance::requests::{
    ManualMarkRequest, ScanRequest, SessionQueryParams, StartSessionRequest,
};
use crate::services::attendance::AttendanceService;
use crate::utils::SafeSessionIdI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn start_session(
    req: HttpRequest,
    auth: AuthContext,
    session_data: web::Json<StartSessionRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .start_session(session_data.into_inner(), &auth, &req)
        .await
}

pub async fn stop_session(
    req: HttpRequest,
    auth: AuthContext,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .stop_session(session_id.0, &auth, &req)
        .await
}

pub async fn cancel_session(
    req: HttpRequest,
    auth: AuthContext,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .cancel_session(session_id.0, &auth, &req)
        .await
}

pub async fn list_sessions(
    req: HttpRequest,
    auth: AuthContext,
    query: web::Query<SessionQueryParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_sessions(query.into_inner(), &auth, &req)
        .await
}

pub async fn session_detail(
    req: HttpRequest,
    auth: AuthContext,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .session_detail(session_id.0, &auth, &req)
        .await
}

pub async fn manual_mark(
    req: HttpRequest,
    auth: AuthContext,
    session_id: SafeSessionIdI64,
    mark_data: web::Json<ManualMarkRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .manual_mark(session_id.0, mark_data.into_inner(), &auth, &req)
        .await
}

pub async fn scan(req: HttpRequest, scan_data: web::Json<ScanRequest>) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.scan(scan_data.into_inner(), &req).await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/face-recognition")
            // Device-trusted check-in, no JWT
            .service(
                web::resource("/scan")
                    .wrap(middlewares::RateLimit::scan())
                    .route(web::post().to(scan)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(
                        AccountRole::lecturer_roles(),
                    ))
                    .wrap(middlewares::RequireJWT)
                    .route("/session/start", web::post().to(start_session))
                    .route("/session/{session_id}/stop", web::post().to(stop_session))
                    .route(
                        "/session/{session_id}/cancel",
                        web::post().to(cancel_session),
                    )
                    .route(
                        "/session/{session_id}/manual",
                        web::post().to(manual_mark),
                    )
                    .route("/session/{session_id}", web::get().to(session_detail))
                    .route("/sessions", web::get().to(list_sessions)),
            ),
    );
}
