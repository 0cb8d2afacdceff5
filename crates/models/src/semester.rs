#[cfg(feature = "database")]
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// One of the eight fixed semester labels a course or a student can carry
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
)]
#[cfg_attr(
    feature = "database",
    derive(EnumIter, DeriveActiveEnum),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")
)]
pub enum Semester {
    #[cfg_attr(feature = "database", sea_orm(string_value = "1"))]
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    First,
    #[cfg_attr(feature = "database", sea_orm(string_value = "2"))]
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Second,
    #[cfg_attr(feature = "database", sea_orm(string_value = "3"))]
    #[serde(rename = "3")]
    #[strum(serialize = "3")]
    Third,
    #[cfg_attr(feature = "database", sea_orm(string_value = "4"))]
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Fourth,
    #[cfg_attr(feature = "database", sea_orm(string_value = "5"))]
    #[serde(rename = "5")]
    #[strum(serialize = "5")]
    Fifth,
    #[cfg_attr(feature = "database", sea_orm(string_value = "6"))]
    #[serde(rename = "6")]
    #[strum(serialize = "6")]
    Sixth,
    #[cfg_attr(feature = "database", sea_orm(string_value = "7"))]
    #[serde(rename = "7")]
    #[strum(serialize = "7")]
    Seventh,
    #[cfg_attr(feature = "database", sea_orm(string_value = "8"))]
    #[serde(rename = "8")]
    #[strum(serialize = "8")]
    Eighth,
}

impl Semester {
    /// The label stored in the database and shown to users ("1" through "8")
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Parses a label typed by a person, tolerating whitespace and
    /// spreadsheet-style numbers such as "3.0"
    pub fn parse_label(label: &str) -> Option<Semester> {
        let label = label.trim();
        let label = label.strip_suffix(".0").unwrap_or(label);
        label.parse().ok()
    }
}
