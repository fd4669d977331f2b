use serde::Deserialize;

use super::entities::AttendanceStatus;

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub class_id: i64,
    /// External device identifier ("DEV-1"), not the internal row id.
    pub device_id: String,
    pub title: String,
    pub duration_minutes: i32,
}

/// Check-in attempt pushed by a device. The image payload is forwarded to the
/// recognition boundary untouched.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub device_id: String,
    pub image: String, // base64
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ManualMarkRequest {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionQueryParams {
    pub class_id: Option<i64>,
    pub status: Option<super::entities::SessionStatus>,
}

/// Storage-level payload for a recognized device check-in.
#[derive(Debug, Clone)]
pub struct CheckInData {
    pub session_id: i64,
    pub student_id: i64,
    pub confidence: f64,
    pub location: Option<String>,
    pub device_id: i64,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Storage-level session list filter.
#[derive(Debug, Clone, Default)]
pub struct SessionListQuery {
    pub class_id: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub status: Option<super::entities::SessionStatus>,
}
