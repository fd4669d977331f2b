use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, AuthContext};
use crate::services::reports::ReportService;

static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn dashboard(req: HttpRequest, auth: AuthContext) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.dashboard(&auth, &req).await
}

pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reports")
            .wrap(middlewares::RequireJWT)
            .route("/dashboard", web::get().to(dashboard)),
    );
}
