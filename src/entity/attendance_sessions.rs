//! Attendance session entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub lecturer_id: i64,
    pub device_id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub code: String,
    pub status: String,
    pub duration_minutes: i32,
    pub started_at: i64,
    pub ended_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_sections::Entity",
        from = "Column::ClassId",
        to = "super::class_sections::Column::Id"
    )]
    ClassSection,
    #[sea_orm(
        belongs_to = "super::devices::Entity",
        from = "Column::DeviceId",
        to = "super::devices::Column::Id"
    )]
    Device,
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    AttendanceRecords,
}

impl Related<super::class_sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSection.def()
    }
}

impl Related<super::devices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl Related<super::attendance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_session(self) -> crate::models::attendance::entities::AttendanceSession {
        use crate::models::attendance::entities::{AttendanceSession, SessionStatus};
        use chrono::{DateTime, Utc};

        AttendanceSession {
            id: self.id,
            class_id: self.class_id,
            lecturer_id: self.lecturer_id,
            device_id: self.device_id,
            title: self.title,
            code: self.code,
            status: self.status.parse().unwrap_or(SessionStatus::Cancelled),
            duration_minutes: self.duration_minutes,
            started_at: DateTime::<Utc>::from_timestamp(self.started_at, 0).unwrap_or_default(),
            ended_at: self
                .ended_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
