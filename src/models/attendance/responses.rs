use serde::Serialize;

use super::entities::{AttendanceRecord, AttendanceSession, AttendanceStatus};
use crate::models::reports::percentage;

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    #[serde(flatten)]
    pub session: AttendanceSession,
    /// started_at + duration; informational, never enforced.
    pub expected_end: chrono::DateTime<chrono::Utc>,
}

/// Outcome of a device scan. `matched: false` is a normal response, not an
/// error.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<crate::models::students::entities::Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AttendanceRecord>,
    pub already_recorded: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub items: Vec<SessionWithClass>,
}

#[derive(Debug, Serialize)]
pub struct SessionWithClass {
    #[serde(flatten)]
    pub session: AttendanceSession,
    pub class: Option<crate::models::classes::entities::ClassSectionDetail>,
}

/// One roster line in the session detail: every actively enrolled student
/// appears, `absent` when no record exists.
#[derive(Debug, Serialize)]
pub struct SessionRosterEntry {
    pub student: crate::models::students::entities::Student,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AttendanceRecord>,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub enrolled: i64,
    pub present: i64,
    pub excused: i64,
    pub sick: i64,
    pub absent: i64,
    pub attendance_percentage: f64,
}

impl SessionSummary {
    pub fn from_roster(roster: &[SessionRosterEntry]) -> Self {
        let enrolled = roster.len() as i64;
        let count = |status: AttendanceStatus| {
            roster.iter().filter(|entry| entry.status == status).count() as i64
        };
        let present = count(AttendanceStatus::Present);
        let excused = count(AttendanceStatus::Excused);
        let sick = count(AttendanceStatus::Sick);
        let absent = count(AttendanceStatus::Absent);
        Self {
            enrolled,
            present,
            excused,
            sick,
            absent,
            attendance_percentage: percentage(present, enrolled),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    pub session: AttendanceSession,
    pub class: Option<crate::models::classes::entities::ClassSectionDetail>,
    pub device: Option<crate::models::devices::entities::Device>,
    pub roster: Vec<SessionRosterEntry>,
    pub summary: SessionSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::Student;

    fn student(id: i64) -> Student {
        Student {
            id,
            nim: format!("21105110{id:02}"),
            full_name: format!("Student {id}"),
            email: format!("s{id}@kampus.ac.id"),
            department: "Informatika".into(),
            phone: None,
            address: None,
            photo_path: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let roster = vec![
            SessionRosterEntry {
                student: student(1),
                status: AttendanceStatus::Present,
                record: None,
            },
            SessionRosterEntry {
                student: student(2),
                status: AttendanceStatus::Sick,
                record: None,
            },
            SessionRosterEntry {
                student: student(3),
                status: AttendanceStatus::Absent,
                record: None,
            },
            SessionRosterEntry {
                student: student(4),
                status: AttendanceStatus::Present,
                record: None,
            },
        ];
        let summary = SessionSummary::from_roster(&roster);
        assert_eq!(summary.enrolled, 4);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.sick, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.attendance_percentage, 50.0);
    }

    #[test]
    fn test_summary_empty_roster() {
        let summary = SessionSummary::from_roster(&[]);
        assert_eq!(summary.enrolled, 0);
        assert_eq!(summary.attendance_percentage, 0.0);
    }
}
