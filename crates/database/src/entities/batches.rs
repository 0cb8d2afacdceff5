use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A cohort of students identified by its enrollment years
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::course_batches::Entity")]
    CourseBatches,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::course_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseBatches.def()
    }
}

// Many-to-many relationship with courses
impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_batches::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_batches::Relation::Batch.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
