#[cfg(feature = "database")]
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Outcome of a single course attempt
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
)]
#[cfg_attr(
    feature = "database",
    derive(EnumIter, DeriveActiveEnum),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")
)]
pub enum CourseStatusKind {
    /// Selected for the semester, not yet graded
    #[cfg_attr(feature = "database", sea_orm(string_value = "Enrolled"))]
    Enrolled,
    #[cfg_attr(feature = "database", sea_orm(string_value = "Pass"))]
    Pass,
    #[cfg_attr(feature = "database", sea_orm(string_value = "Fail"))]
    Fail,
}

impl CourseStatusKind {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Whether this status is the result of grading
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Pass | Self::Fail)
    }
}
