//! SeaORM entity definitions.
//!
//! These map database rows; the storage layer converts them into the
//! business models under `crate::models`.

pub mod prelude;

pub mod accounts;
pub mod attendance_records;
pub mod attendance_sessions;
pub mod class_sections;
pub mod courses;
pub mod devices;
pub mod enrollments;
pub mod lecturers;
pub mod students;
