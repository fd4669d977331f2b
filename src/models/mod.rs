pub mod accounts;
pub mod attendance;
pub mod classes;
pub mod common;
pub mod courses;
pub mod devices;
pub mod enrollments;
pub mod lecturers;
pub mod reports;
pub mod students;
pub mod uploads;

use serde::{Deserialize, Serialize};

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// Machine-readable error codes carried in the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidCredentials,
    AccountInactive,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    CapacityExceeded,
    DuplicateEnrollment,
    NotEnrolled,
    SessionAlreadyActive,
    SessionNotActive,
    DeviceInactive,
    AlreadyRecorded,
    FileTypeNotAllowed,
    FileTooLarge,
    UploadFailed,
    RateLimited,
    InternalServerError,
}

/// Server process start time, recorded before startup work begins.
#[derive(Debug, Clone, Serialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_wire_format() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::SessionAlreadyActive).unwrap(),
            "\"SESSION_ALREADY_ACTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::NotFound).unwrap(),
            "\"NOT_FOUND\""
        );
    }
}
