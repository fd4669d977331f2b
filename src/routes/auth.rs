use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, AuthContext};
use crate::models::accounts::entities::AccountRole;
use crate::models::accounts::requests::{
    ChangePasswordRequest, LoginRequest, RegisterAccountRequest,
};
use crate::services::auth::AuthService;

static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(login_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn me(auth: AuthContext, request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.me(auth, &request).await
}

pub async fn change_password(
    auth: AuthContext,
    change_data: web::Json<ChangePasswordRequest>,
    request: HttpRequest,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .change_password(auth, change_data.into_inner(), &request)
        .await
}

pub async fn register(
    req: HttpRequest,
    register_data: web::Json<RegisterAccountRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(register_data.into_inner(), &req).await
}

pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(
                web::resource("/login")
                    .wrap(middlewares::RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(middlewares::RateLimit::refresh_token())
                    .route(web::post().to(refresh_token)),
            )
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me", web::get().to(me))
                    .route("/change-password", web::post().to(change_password))
                    .service(
                        web::resource("/register")
                            .wrap(middlewares::RequireRole::new(&AccountRole::Admin))
                            .route(web::post().to(register)),
                    ),
            ),
    );
}
