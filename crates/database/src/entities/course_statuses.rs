use models::{course_status::CourseStatusKind, semester::Semester};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One attempt at one course, attached to a semester report
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sem_report_id: i32,
    pub course_id: i32,
    pub status: CourseStatusKind,
    pub semester: Semester,
    pub enrolled_on: Date,
    pub completed_on: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sem_reports::Entity",
        from = "Column::SemReportId",
        to = "super::sem_reports::Column::Id"
    )]
    SemReport,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::sem_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SemReport.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
