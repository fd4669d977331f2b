use serde::Deserialize;

use super::entities::{AccountRole, ProfileRef};

/// Login accepts a username or an email in the same field.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterAccountRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: AccountRole,
    pub profile: Option<ProfileRef>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Storage-level account creation.
#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub profile: ProfileRef,
    pub must_change_password: bool,
}
