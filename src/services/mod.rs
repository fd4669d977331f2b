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

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use courses::CourseService;
pub use devices::DeviceService;
pub use enrollments::EnrollmentService;
pub use lecturers::LecturerService;
pub use reports::ReportService;
pub use students::StudentService;
pub use uploads::UploadService;
