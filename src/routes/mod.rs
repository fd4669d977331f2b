pub mod attendance;
pub mod auth;
pub mod classes;
pub mod courses;
pub mod devices;
pub mod enrollments;
pub mod lecturers;
pub mod reports;
pub mod students;
pub mod uploads;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_class_routes;
pub use courses::configure_course_routes;
pub use devices::configure_device_routes;
pub use enrollments::configure_enrollment_routes;
pub use lecturers::configure_lecturer_routes;
pub use reports::configure_report_routes;
pub use students::configure_student_routes;
pub use uploads::configure_upload_routes;
