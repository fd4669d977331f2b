//! SeaORM storage implementation.
//!
//! One database layer covering SQLite, PostgreSQL and MySQL.

mod accounts;
mod attendance;
mod classes;
mod courses;
mod devices;
mod enrollments;
mod lecturers;
mod reports;
mod students;

use crate::config::AppConfig;
use crate::errors::{Result, SiabsenError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite connection (WAL + pragma tuning)
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SiabsenError::database_config(format!("Bad SQLite URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                SiabsenError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Pooled connection for PostgreSQL and MySQL
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SiabsenError::database_connection(format!("Cannot connect: {e}")))
    }

    /// Infer the database type from the URL, defaulting bare paths to SQLite
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SiabsenError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // Accounts
    async fn create_account(&self, account: CreateAccountRequest) -> Result<Account> {
        self.create_account_impl(account).await
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn get_account_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>> {
        self.get_account_by_username_or_email_impl(identifier).await
    }

    async fn get_account_by_profile(&self, profile: &ProfileRef) -> Result<Option<Account>> {
        self.get_account_by_profile_impl(profile).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password_impl(id, password_hash).await
    }

    // Students
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_nim(&self, nim: &str) -> Result<Option<Student>> {
        self.get_student_by_nim_impl(nim).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn update_student_photo(&self, id: i64, photo_path: &str) -> Result<bool> {
        self.update_student_photo_impl(id, photo_path).await
    }

    // Lecturers
    async fn create_lecturer(&self, lecturer: CreateLecturerRequest) -> Result<Lecturer> {
        self.create_lecturer_impl(lecturer).await
    }

    async fn get_lecturer_by_id(&self, id: i64) -> Result<Option<Lecturer>> {
        self.get_lecturer_by_id_impl(id).await
    }

    async fn get_lecturer_by_nidn(&self, nidn: &str) -> Result<Option<Lecturer>> {
        self.get_lecturer_by_nidn_impl(nidn).await
    }

    async fn get_lecturer_by_email(&self, email: &str) -> Result<Option<Lecturer>> {
        self.get_lecturer_by_email_impl(email).await
    }

    async fn list_lecturers_with_pagination(
        &self,
        query: LecturerListQuery,
    ) -> Result<LecturerListResponse> {
        self.list_lecturers_with_pagination_impl(query).await
    }

    async fn update_lecturer(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
    ) -> Result<Option<Lecturer>> {
        self.update_lecturer_impl(id, update).await
    }

    async fn delete_lecturer(&self, id: i64) -> Result<bool> {
        self.delete_lecturer_impl(id).await
    }

    async fn update_lecturer_photo(&self, id: i64, photo_path: &str) -> Result<bool> {
        self.update_lecturer_photo_impl(id, photo_path).await
    }

    // Courses
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // Classes
    async fn create_class(&self, class: CreateClassRequest) -> Result<ClassSection> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<ClassSection>> {
        self.get_class_by_id_impl(id).await
    }

    async fn get_class_detail(&self, id: i64) -> Result<Option<ClassSectionDetail>> {
        self.get_class_detail_impl(id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<ClassSection>> {
        self.update_class_impl(id, update).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    // Enrollments
    async fn enroll_students(
        &self,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<Option<EnrollBatchResponse>> {
        self.enroll_students_impl(class_id, student_ids).await
    }

    async fn class_roster(&self, class_id: i64) -> Result<ClassRosterResponse> {
        self.class_roster_impl(class_id).await
    }

    async fn deactivate_enrollment(&self, enrollment_id: i64) -> Result<bool> {
        self.deactivate_enrollment_impl(enrollment_id).await
    }

    async fn active_student_ids(&self, class_id: i64) -> Result<Vec<i64>> {
        self.active_student_ids_impl(class_id).await
    }

    // Devices
    async fn create_device(&self, device: CreateDeviceRequest) -> Result<Device> {
        self.create_device_impl(device).await
    }

    async fn get_device_by_id(&self, id: i64) -> Result<Option<Device>> {
        self.get_device_by_id_impl(id).await
    }

    async fn get_device_by_device_id(&self, device_id: &str) -> Result<Option<Device>> {
        self.get_device_by_device_id_impl(device_id).await
    }

    async fn list_devices_with_pagination(
        &self,
        query: DeviceListQuery,
    ) -> Result<DeviceListResponse> {
        self.list_devices_with_pagination_impl(query).await
    }

    async fn update_device(&self, id: i64, update: UpdateDeviceRequest) -> Result<Option<Device>> {
        self.update_device_impl(id, update).await
    }

    async fn delete_device(&self, id: i64) -> Result<bool> {
        self.delete_device_impl(id).await
    }

    async fn record_heartbeat(&self, device_id: &str) -> Result<Option<Device>> {
        self.record_heartbeat_impl(device_id).await
    }

    // Attendance sessions
    async fn start_session(
        &self,
        class_id: i64,
        lecturer_id: i64,
        device_id: i64,
        title: &str,
        duration_minutes: i32,
        code: &str,
    ) -> Result<Option<AttendanceSession>> {
        self.start_session_impl(class_id, lecturer_id, device_id, title, duration_minutes, code)
            .await
    }

    async fn get_session_by_id(&self, id: i64) -> Result<Option<AttendanceSession>> {
        self.get_session_by_id_impl(id).await
    }

    async fn get_active_session_for_device(
        &self,
        device_id: i64,
    ) -> Result<Option<AttendanceSession>> {
        self.get_active_session_for_device_impl(device_id).await
    }

    async fn end_session(
        &self,
        session_id: i64,
        status: SessionStatus,
    ) -> Result<Option<AttendanceSession>> {
        self.end_session_impl(session_id, status).await
    }

    async fn list_sessions(&self, query: SessionListQuery) -> Result<SessionListResponse> {
        self.list_sessions_impl(query).await
    }

    async fn session_detail(&self, session_id: i64) -> Result<Option<SessionDetailResponse>> {
        self.session_detail_impl(session_id).await
    }

    // Attendance records
    async fn check_in(&self, data: CheckInData) -> Result<(AttendanceRecord, bool)> {
        self.check_in_impl(data).await
    }

    async fn manual_mark(
        &self,
        session_id: i64,
        student_id: i64,
        status: AttendanceStatus,
        note: Option<String>,
    ) -> Result<Option<AttendanceRecord>> {
        self.manual_mark_impl(session_id, student_id, status, note)
            .await
    }

    // Reports
    async fn admin_dashboard(&self) -> Result<AdminDashboard> {
        self.admin_dashboard_impl().await
    }

    async fn lecturer_dashboard(&self, lecturer_id: i64) -> Result<LecturerDashboard> {
        self.lecturer_dashboard_impl(lecturer_id).await
    }

    async fn student_dashboard(&self, student_id: i64) -> Result<StudentDashboard> {
        self.student_dashboard_impl(student_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::classes::entities::Term;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::devices::requests::CreateDeviceRequest;
    use crate::models::lecturers::requests::CreateLecturerRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    /// Fresh in-memory database with migrations applied. Single connection so
    /// every query in a test sees the same store.
    pub(crate) async fn storage() -> SeaOrmStorage {
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("in-memory database");
        Migrator::up(&db, None).await.expect("migrations");
        SeaOrmStorage { db }
    }

    /// Course + lecturer + class section; returns (class_id, lecturer_id).
    pub(crate) async fn seed_class(storage: &SeaOrmStorage, capacity: i32) -> (i64, i64) {
        let course = storage
            .create_course_impl(CreateCourseRequest {
                code: "IF101".to_string(),
                name: "Algoritma dan Pemrograman".to_string(),
                credits: 3,
                semester: 1,
                department: "Informatika".to_string(),
            })
            .await
            .expect("course");

        let lecturer = storage
            .create_lecturer_impl(CreateLecturerRequest {
                nidn: "0012345678".to_string(),
                full_name: "Dr. Sari Wijaya".to_string(),
                email: "sari@kampus.ac.id".to_string(),
                department: "Informatika".to_string(),
                phone: None,
                create_account: false,
            })
            .await
            .expect("lecturer");

        let class = storage
            .create_class_impl(CreateClassRequest {
                course_id: course.id,
                lecturer_id: lecturer.id,
                day_of_week: 1,
                start_time: "08:00".to_string(),
                end_time: "10:00".to_string(),
                room: "A-101".to_string(),
                capacity,
                academic_year: "2025/2026".to_string(),
                term: Term::Odd,
            })
            .await
            .expect("class");

        (class.id, lecturer.id)
    }

    pub(crate) async fn seed_student(storage: &SeaOrmStorage, nim: &str) -> i64 {
        storage
            .create_student_impl(CreateStudentRequest {
                nim: nim.to_string(),
                full_name: format!("Mahasiswa {nim}"),
                email: format!("{nim}@kampus.ac.id"),
                department: "Informatika".to_string(),
                phone: None,
                address: None,
                create_account: false,
            })
            .await
            .expect("student")
            .id
    }

    pub(crate) async fn seed_device(storage: &SeaOrmStorage, external_id: &str) -> i64 {
        storage
            .create_device_impl(CreateDeviceRequest {
                device_id: external_id.to_string(),
                name: format!("Scanner {external_id}"),
                location: "Gedung A".to_string(),
                class_id: None,
            })
            .await
            .expect("device")
            .id
    }
}
