use models::semester::Semester;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub is_elective: bool,
    pub credit: i32,
    pub semester: Semester,
    pub department_id: i32,
    pub program_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::programs::Entity",
        from = "Column::ProgramId",
        to = "super::programs::Column::Id"
    )]
    Program,
    #[sea_orm(has_many = "super::course_batches::Entity")]
    CourseBatches,
    #[sea_orm(has_many = "super::course_statuses::Entity")]
    CourseStatuses,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl Related<super::course_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseBatches.def()
    }
}

impl Related<super::course_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStatuses.def()
    }
}

// Many-to-many relationship with batches
impl Related<super::batches::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_batches::Relation::Batch.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_batches::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
