//! Typed path extractors.
//!
//! Path ids arrive as strings; these extractors parse and bound-check them
//! once at the routing seam so handlers work with plain values.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_id_extractor {
    ($name:ident, $segment:literal) => {
        /// Positive i64 path segment.
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($segment)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(actix_web::error::InternalError::from_response(
                        "invalid path id",
                        actix_web::HttpResponse::BadRequest().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::ValidationError,
                                format!("Invalid {} in path", $segment),
                            ),
                        ),
                    )
                    .into()),
                })
            }
        }
    };
}

define_id_extractor!(SafeIdI64, "id");
define_id_extractor!(SafeClassIdI64, "class_id");
define_id_extractor!(SafeSessionIdI64, "session_id");

/// External device identifier path segment ("DEV-1" style).
pub struct SafeDeviceId(pub String);

impl FromRequest for SafeDeviceId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("device_id").unwrap_or_default();
        let valid = !raw.is_empty()
            && raw.len() <= 64
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        ready(if valid {
            Ok(SafeDeviceId(raw.to_string()))
        } else {
            Err(actix_web::error::InternalError::from_response(
                "invalid device id",
                actix_web::HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::ValidationError,
                    "Invalid device_id in path",
                )),
            )
            .into())
        })
    }
}
