use std::sync::Arc;

use crate::models::{
    accounts::{
        entities::{Account, ProfileRef},
        requests::CreateAccountRequest,
    },
    attendance::{
        entities::{AttendanceRecord, AttendanceSession, AttendanceStatus, SessionStatus},
        requests::{CheckInData, SessionListQuery},
        responses::{SessionDetailResponse, SessionListResponse},
    },
    classes::{
        entities::{ClassSection, ClassSectionDetail},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    devices::{
        entities::Device,
        requests::{CreateDeviceRequest, DeviceListQuery, UpdateDeviceRequest},
        responses::DeviceListResponse,
    },
    enrollments::responses::{ClassRosterResponse, EnrollBatchResponse},
    lecturers::{
        entities::Lecturer,
        requests::{CreateLecturerRequest, LecturerListQuery, UpdateLecturerRequest},
        responses::LecturerListResponse,
    },
    reports::responses::{AdminDashboard, LecturerDashboard, StudentDashboard},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Account methods
    async fn create_account(&self, account: CreateAccountRequest) -> Result<Account>;
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>>;
    async fn get_account_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>>;
    async fn get_account_by_profile(&self, profile: &ProfileRef) -> Result<Option<Account>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // Clears must_change_password when the rotation succeeds
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;

    /// Student catalog methods
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_nim(&self, nim: &str) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn update_student_photo(&self, id: i64, photo_path: &str) -> Result<bool>;

    /// Lecturer catalog methods
    async fn create_lecturer(&self, lecturer: CreateLecturerRequest) -> Result<Lecturer>;
    async fn get_lecturer_by_id(&self, id: i64) -> Result<Option<Lecturer>>;
    async fn get_lecturer_by_nidn(&self, nidn: &str) -> Result<Option<Lecturer>>;
    async fn get_lecturer_by_email(&self, email: &str) -> Result<Option<Lecturer>>;
    async fn list_lecturers_with_pagination(
        &self,
        query: LecturerListQuery,
    ) -> Result<LecturerListResponse>;
    async fn update_lecturer(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
    ) -> Result<Option<Lecturer>>;
    async fn delete_lecturer(&self, id: i64) -> Result<bool>;
    async fn update_lecturer_photo(&self, id: i64, photo_path: &str) -> Result<bool>;

    /// Course catalog methods
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// Class section methods
    async fn create_class(&self, class: CreateClassRequest) -> Result<ClassSection>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<ClassSection>>;
    async fn get_class_detail(&self, id: i64) -> Result<Option<ClassSectionDetail>>;
    async fn list_classes_with_pagination(&self, query: ClassListQuery)
    -> Result<ClassListResponse>;
    async fn update_class(
        &self,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<ClassSection>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;

    /// Enrollment methods
    // Capacity is checked and rows are inserted inside one transaction;
    // None means the batch would overflow the class capacity
    async fn enroll_students(
        &self,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<Option<EnrollBatchResponse>>;
    async fn class_roster(&self, class_id: i64) -> Result<ClassRosterResponse>;
    // Soft removal keyed by the enrollment row id; false when no active row
    async fn deactivate_enrollment(&self, enrollment_id: i64) -> Result<bool>;
    async fn active_student_ids(&self, class_id: i64) -> Result<Vec<i64>>;

    /// Device registry methods
    async fn create_device(&self, device: CreateDeviceRequest) -> Result<Device>;
    async fn get_device_by_id(&self, id: i64) -> Result<Option<Device>>;
    async fn get_device_by_device_id(&self, device_id: &str) -> Result<Option<Device>>;
    async fn list_devices_with_pagination(
        &self,
        query: DeviceListQuery,
    ) -> Result<DeviceListResponse>;
    async fn update_device(&self, id: i64, update: UpdateDeviceRequest) -> Result<Option<Device>>;
    async fn delete_device(&self, id: i64) -> Result<bool>;
    // Returns the device with its refreshed heartbeat
    async fn record_heartbeat(&self, device_id: &str) -> Result<Option<Device>>;

    /// Attendance session methods
    // Returns None when the class already has an active session; the check
    // and the insert share one transaction
    async fn start_session(
        &self,
        class_id: i64,
        lecturer_id: i64,
        device_id: i64,
        title: &str,
        duration_minutes: i32,
        code: &str,
    ) -> Result<Option<AttendanceSession>>;
    async fn get_session_by_id(&self, id: i64) -> Result<Option<AttendanceSession>>;
    async fn get_active_session_for_device(
        &self,
        device_id: i64,
    ) -> Result<Option<AttendanceSession>>;
    // Conditional update; None when the session is not active anymore
    async fn end_session(
        &self,
        session_id: i64,
        status: SessionStatus,
    ) -> Result<Option<AttendanceSession>>;
    async fn list_sessions(&self, query: SessionListQuery) -> Result<SessionListResponse>;
    async fn session_detail(&self, session_id: i64) -> Result<Option<SessionDetailResponse>>;

    /// Attendance record methods
    // Insert-or-fetch: the bool is false when a record already existed
    async fn check_in(&self, data: CheckInData) -> Result<(AttendanceRecord, bool)>;
    // None when the student already has a record in this session
    async fn manual_mark(
        &self,
        session_id: i64,
        student_id: i64,
        status: AttendanceStatus,
        note: Option<String>,
    ) -> Result<Option<AttendanceRecord>>;

    /// Reporting methods
    async fn admin_dashboard(&self) -> Result<AdminDashboard>;
    async fn lecturer_dashboard(&self, lecturer_id: i64) -> Result<LecturerDashboard>;
    async fn student_dashboard(&self, student_id: i64) -> Result<StudentDashboard>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
