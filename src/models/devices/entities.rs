use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub device_id: String, // external identifier printed on the unit
    pub name: String,
    pub location: String,
    pub class_id: Option<i64>,
    pub active: bool,
    pub last_heartbeat: Option<chrono::DateTime<chrono::Utc>>,
    /// Derived from heartbeat recency at read time, never stored.
    pub online: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Online means a heartbeat within the configured window.
pub fn is_online(
    last_heartbeat: Option<chrono::DateTime<chrono::Utc>>,
    now: chrono::DateTime<chrono::Utc>,
    window_secs: i64,
) -> bool {
    match last_heartbeat {
        Some(ts) => now.signed_duration_since(ts).num_seconds() <= window_secs,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_online_within_window() {
        let now = Utc::now();
        assert!(is_online(Some(now - Duration::seconds(299)), now, 300));
        assert!(is_online(Some(now), now, 300));
    }

    #[test]
    fn test_offline_after_window() {
        let now = Utc::now();
        assert!(!is_online(Some(now - Duration::seconds(301)), now, 300));
    }

    #[test]
    fn test_offline_without_heartbeat() {
        assert!(!is_online(None, Utc::now(), 300));
    }
}
