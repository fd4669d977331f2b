/*!
 * JWT authentication middleware.
 *
 * Verifies the `Authorization: Bearer <token>` header, reloads the account
 * from storage, and inserts an [`AuthContext`] into the request extensions.
 * Handlers receive the context explicitly as an extractor argument:
 *
 * ```rust,ignore
 * async fn handler(auth: AuthContext) -> ActixResult<HttpResponse> {
 *     let account_id = auth.account.id;
 *     // ...
 * }
 * ```
 *
 * The account is always read fresh from storage, so a deactivated account
 * loses access on its next request even while its token is still valid.
 */

use crate::models::accounts::entities::{Account, AccountRole, AccountStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

/// Authenticated caller, passed to handlers as an extractor.
#[derive(Clone)]
pub struct AuthContext {
    pub account: Account,
}

impl AuthContext {
    pub fn role(&self) -> &AccountRole {
        &self.account.role
    }

    pub fn student_id(&self) -> Option<i64> {
        self.account.profile.student_id()
    }

    pub fn lecturer_id(&self) -> Option<i64> {
        self.account.profile.lecturer_id()
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let ctx = req.extensions().get::<AuthContext>().cloned();
        ready(ctx.ok_or_else(|| {
            InternalError::from_response(
                "Unauthorized",
                actix_web::HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                    ErrorCode::Unauthorized,
                    "Authentication required",
                )),
            )
            .into()
        }))
    }
}

#[derive(Clone)]
pub struct RequireJWT;

async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Account, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let account_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid account ID in JWT".to_string())?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let account = storage
        .get_account_by_id(account_id)
        .await
        .map_err(|_| "Failed to retrieve account from storage".to_string())?
        .ok_or_else(|| "Account not found".to_string())?;

    if account.status != AccountStatus::Active {
        return Err("Account is not active".to_string());
    }

    Ok(account)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Unauthorized, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(account) => {
                    debug!("JWT authentication successful for ID: {}", account.id);
                    req.extensions_mut().insert(AuthContext { account });
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
