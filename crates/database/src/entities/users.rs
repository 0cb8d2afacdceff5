use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Login identity shared by HODs, students and administrators
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2id PHC string
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::hods::Entity")]
    Hod,
    #[sea_orm(has_one = "super::students::Entity")]
    Student,
    #[sea_orm(has_many = "super::auth_tokens::Entity")]
    AuthTokens,
}

impl Related<super::hods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hod.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::auth_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
