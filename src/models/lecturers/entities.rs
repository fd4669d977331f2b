use serde::{Deserialize, Serialize};

/// Lecturer profile; `nidn` is the institution id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: i64,
    pub nidn: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub phone: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
