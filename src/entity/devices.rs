//! Scanner device entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub device_id: String,
    pub name: String,
    pub location: String,
    pub class_id: Option<i64>,
    pub active: bool,
    pub last_heartbeat: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_sections::Entity",
        from = "Column::ClassId",
        to = "super::class_sections::Column::Id"
    )]
    ClassSection,
    #[sea_orm(has_many = "super::attendance_sessions::Entity")]
    AttendanceSessions,
}

impl Related<super::class_sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSection.def()
    }
}

impl Related<super::attendance_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `online` is derived from heartbeat recency at conversion time.
    pub fn into_device(
        self,
        now: chrono::DateTime<chrono::Utc>,
        window_secs: i64,
    ) -> crate::models::devices::entities::Device {
        use crate::models::devices::entities::{Device, is_online};
        use chrono::{DateTime, Utc};

        let last_heartbeat = self
            .last_heartbeat
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));
        Device {
            id: self.id,
            device_id: self.device_id,
            name: self.name,
            location: self.location,
            class_id: self.class_id,
            active: self.active,
            online: is_online(last_heartbeat, now, window_secs),
            last_heartbeat,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
