use serde::{Deserialize, Serialize};

// Account roles
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Admin,
    Lecturer,
    Student,
}

impl AccountRole {
    pub const ADMIN: &'static str = "admin";
    pub const LECTURER: &'static str = "lecturer";
    pub const STUDENT: &'static str = "student";

    pub fn admin_roles() -> &'static [&'static AccountRole] {
        &[&Self::Admin]
    }
    pub fn lecturer_roles() -> &'static [&'static AccountRole] {
        &[&Self::Lecturer, &Self::Admin]
    }
    pub fn student_roles() -> &'static [&'static AccountRole] {
        &[&Self::Student, &Self::Admin]
    }
    pub fn all_roles() -> &'static [&'static AccountRole] {
        &[&Self::Admin, &Self::Lecturer, &Self::Student]
    }
}

impl<'de> Deserialize<'de> for AccountRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AccountRole::ADMIN => Ok(AccountRole::Admin),
            AccountRole::LECTURER => Ok(AccountRole::Lecturer),
            AccountRole::STUDENT => Ok(AccountRole::Student),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid account role: '{s}'. Supported roles: admin, lecturer, student"
            ))),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Admin => write!(f, "{}", AccountRole::ADMIN),
            AccountRole::Lecturer => write!(f, "{}", AccountRole::LECTURER),
            AccountRole::Student => write!(f, "{}", AccountRole::STUDENT),
        }
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AccountRole::Admin),
            "lecturer" => Ok(AccountRole::Lecturer),
            "student" => Ok(AccountRole::Student),
            _ => Err(format!("Invalid account role: {s}")),
        }
    }
}

// Account status
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl<'de> Deserialize<'de> for AccountStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid account status: '{s}'. Supported statuses: active, inactive"
            ))),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            _ => Err(format!("Invalid account status: {s}")),
        }
    }
}

/// Tagged link from an account to its profile row. Replaces the nullable
/// (profile_type, profile_id) column pair everywhere above the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ProfileRef {
    Student(i64),
    Lecturer(i64),
    None,
}

impl ProfileRef {
    pub fn from_columns(profile_type: Option<&str>, profile_id: Option<i64>) -> Self {
        match (profile_type, profile_id) {
            (Some("student"), Some(id)) => ProfileRef::Student(id),
            (Some("lecturer"), Some(id)) => ProfileRef::Lecturer(id),
            _ => ProfileRef::None,
        }
    }

    pub fn into_columns(&self) -> (Option<String>, Option<i64>) {
        match self {
            ProfileRef::Student(id) => (Some("student".to_string()), Some(*id)),
            ProfileRef::Lecturer(id) => (Some("lecturer".to_string()), Some(*id)),
            ProfileRef::None => (None, None),
        }
    }

    pub fn student_id(&self) -> Option<i64> {
        match self {
            ProfileRef::Student(id) => Some(*id),
            _ => None,
        }
    }

    pub fn lecturer_id(&self) -> Option<i64> {
        match self {
            ProfileRef::Lecturer(id) => Some(*id),
            _ => None,
        }
    }
}

// Account entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // never serialized into responses
    pub password_hash: String,
    pub role: AccountRole,
    pub status: AccountStatus,
    pub profile: ProfileRef,
    pub must_change_password: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Account {
    pub fn token_identity(&self) -> crate::utils::jwt::TokenIdentity {
        crate::utils::jwt::TokenIdentity {
            account_id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.to_string(),
            profile: self.profile.clone(),
        }
    }

    pub fn generate_token_pair(
        &self,
    ) -> Result<crate::utils::jwt::TokenPair, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_token_pair(&self.token_identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("lecturer".parse::<AccountRole>(), Ok(AccountRole::Lecturer));
        assert!("staff".parse::<AccountRole>().is_err());
        assert_eq!(AccountRole::Student.to_string(), "student");
    }

    #[test]
    fn test_profile_ref_columns_round_trip() {
        let profile = ProfileRef::Student(7);
        let (ty, id) = profile.into_columns();
        assert_eq!(ProfileRef::from_columns(ty.as_deref(), id), profile);

        assert_eq!(ProfileRef::from_columns(None, Some(9)), ProfileRef::None);
        assert_eq!(
            ProfileRef::from_columns(Some("student"), None),
            ProfileRef::None
        );
    }

    #[test]
    fn test_profile_ref_wire_format() {
        let json = serde_json::to_value(ProfileRef::Lecturer(3)).unwrap();
        assert_eq!(json["type"], "lecturer");
        assert_eq!(json["id"], 3);
        let json = serde_json::to_value(ProfileRef::None).unwrap();
        assert_eq!(json["type"], "none");
    }
}
