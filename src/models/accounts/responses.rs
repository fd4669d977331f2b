use serde::Serialize;

use super::entities::Account;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64, // seconds
    pub must_change_password: bool,
    pub account: Account,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64, // seconds
}

/// `/auth/me` payload: the account plus its resolved profile row, if any.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub account: Account,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<crate::models::students::entities::Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecturer: Option<crate::models::lecturers::entities::Lecturer>,
}
