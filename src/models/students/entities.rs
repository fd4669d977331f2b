use serde::{Deserialize, Serialize};

/// Student profile. `nim` is the external institution id, distinct from the
/// internal row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub nim: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
