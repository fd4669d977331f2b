//! Lecturer profile entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lecturers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub nidn: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub department: String,
    pub phone: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::class_sections::Entity")]
    ClassSections,
}

impl Related<super::class_sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_lecturer(self) -> crate::models::lecturers::entities::Lecturer {
        use crate::models::lecturers::entities::Lecturer;
        use chrono::{DateTime, Utc};

        Lecturer {
            id: self.id,
            nidn: self.nidn,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
            phone: self.phone,
            photo_path: self.photo_path,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
