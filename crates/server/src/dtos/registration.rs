use database::services::identity::NewAccount;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AccountFields {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<AccountFields> for NewAccount {
    fn from(fields: AccountFields) -> Self {
        Self {
            username: fields.username,
            password: fields.password,
            email: fields.email,
            first_name: fields.first_name,
            last_name: fields.last_name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterHodRequest {
    #[serde(flatten)]
    pub account: AccountFields,
    pub department: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterStudentRequest {
    #[serde(flatten)]
    pub account: AccountFields,
    pub program: i32,
    pub batch: i32,
    /// Current semester, "1" through "8"
    pub semester: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredResponse {
    pub message: String,
    pub id: i32,
    pub username: String,
    pub department: String,
}
