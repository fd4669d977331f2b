use serde::Serialize;

/// Admin dashboard: global counts plus today's attendance figures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_students: i64,
    pub total_lecturers: i64,
    pub total_courses: i64,
    pub total_classes: i64,
    pub total_devices: i64,
    pub online_devices: i64,
    pub today_sessions: i64,
    pub total_absensi: i64,
    pub hadir: i64,
    pub hadir_percentage: f64,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub record_id: i64,
    pub session_id: i64,
    pub student_name: String,
    pub status: crate::models::attendance::entities::AttendanceStatus,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

/// Lecturer dashboard, scoped to the lecturer's own classes and today.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LecturerDashboard {
    pub total_classes: i64,
    pub today_sessions: i64,
    pub total_absensi: i64,
    pub hadir: i64,
    pub hadir_percentage: f64,
}

/// Student dashboard: own all-time breakdown plus enrolled classes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub total_records: i64,
    pub hadir: i64,
    pub excused: i64,
    pub sick: i64,
    pub hadir_percentage: f64,
    pub enrolled_classes: Vec<crate::models::classes::entities::ClassSectionDetail>,
}
