use serde::{Deserialize, Serialize};

/// Session lifecycle. A session is created `active`; only an explicit stop or
/// cancel ends it — the planned duration never expires it on its own.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed,
    Cancelled,
}

impl<'de> Deserialize<'de> for SessionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionStatus::Active),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            _ => Err(format!("Invalid session status: {s}")),
        }
    }
}

/// Per-student attendance status within a session.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Excused,
    Sick,
    Absent,
}

impl AttendanceStatus {
    /// Statuses a lecturer may assign by hand; `present` only ever comes from
    /// a device check-in, `absent` is derived, never stored.
    pub fn is_manual(&self) -> bool {
        matches!(self, AttendanceStatus::Excused | AttendanceStatus::Sick)
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Excused => write!(f, "excused"),
            AttendanceStatus::Sick => write!(f, "sick"),
            AttendanceStatus::Absent => write!(f, "absent"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "excused" => Ok(AttendanceStatus::Excused),
            "sick" => Ok(AttendanceStatus::Sick),
            "absent" => Ok(AttendanceStatus::Absent),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

/// A timed attendance window opened for one class on one device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSession {
    pub id: i64,
    pub class_id: i64,
    pub lecturer_id: i64,
    pub device_id: i64,
    pub title: String,
    pub code: String, // human-readable 6-char session code
    pub status: SessionStatus,
    pub duration_minutes: i32,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl AttendanceSession {
    /// Informational only; nothing closes the session when it passes.
    pub fn expected_end(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at + chrono::Duration::minutes(self.duration_minutes as i64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
    pub location: Option<String>,
    pub confidence: Option<f64>,
    pub photo_path: Option<String>,
    pub device_id: Option<i64>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub validated: bool,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse::<SessionStatus>(), Ok(SessionStatus::Active));
        assert!("scheduled!".parse::<SessionStatus>().is_err());
        assert_eq!(
            "excused".parse::<AttendanceStatus>(),
            Ok(AttendanceStatus::Excused)
        );
    }

    #[test]
    fn test_manual_statuses() {
        assert!(AttendanceStatus::Excused.is_manual());
        assert!(AttendanceStatus::Sick.is_manual());
        assert!(!AttendanceStatus::Present.is_manual());
        assert!(!AttendanceStatus::Absent.is_manual());
    }

    #[test]
    fn test_expected_end() {
        let session = AttendanceSession {
            id: 1,
            class_id: 1,
            lecturer_id: 1,
            device_id: 1,
            title: "Week 1".into(),
            code: "ABC234".into(),
            status: SessionStatus::Active,
            duration_minutes: 30,
            started_at: chrono::Utc::now(),
            ended_at: None,
        };
        assert_eq!(
            session.expected_end() - session.started_at,
            chrono::Duration::minutes(30)
        );
    }
}
