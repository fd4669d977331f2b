pub use super::accounts::Entity as Accounts;
pub use super::attendance_records::Entity as AttendanceRecords;
pub use super::attendance_sessions::Entity as AttendanceSessions;
pub use super::class_sections::Entity as ClassSections;
pub use super::courses::Entity as Courses;
pub use super::devices::Entity as Devices;
pub use super::enrollments::Entity as Enrollments;
pub use super::lecturers::Entity as Lecturers;
pub use super::students::Entity as Students;
