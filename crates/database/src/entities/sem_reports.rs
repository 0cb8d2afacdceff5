use models::semester::Semester;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A student's course selection for one semester.
///
/// `(student_id, semester)` is unique. Once `is_approved` is set the
/// attached course statuses can no longer be added or removed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sem_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub semester: Semester,
    pub is_approved: bool,
    pub rejection_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::course_statuses::Entity")]
    CourseStatuses,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStatuses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
