use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The change a student requests for their semester selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentAction {
    Enroll,
    Unenroll,
}

impl FromStr for EnrollmentAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enroll" => Ok(Self::Enroll),
            "unenroll" => Ok(Self::Unenroll),
            other => Err(format!("Invalid request type: {other}")),
        }
    }
}

/// Where a semester report stands in its lifecycle.
///
/// Only `Approved` is stored; `Empty` and `Open` are derived from the number
/// of course statuses and drive dashboard messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportState {
    Empty,
    Open,
    Approved,
}

impl ReportState {
    pub fn of(is_approved: bool, course_count: usize) -> Self {
        match (is_approved, course_count) {
            (true, _) => Self::Approved,
            (false, 0) => Self::Empty,
            (false, _) => Self::Open,
        }
    }

    pub fn message(&self, rejection_reason: Option<&str>) -> String {
        match (self, rejection_reason) {
            (Self::Approved, _) => "Your course selection has been approved.".to_string(),
            (_, Some(reason)) => format!("Your course selection was rejected: {reason}"),
            (Self::Empty, None) => "You have not enrolled in any course this semester.".to_string(),
            (Self::Open, None) => "Your course selection is awaiting approval.".to_string(),
        }
    }
}

/// Aggregate result of a multi-item request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Every item succeeded
    Complete,
    /// Some items succeeded, some failed
    Partial,
    /// No item succeeded
    Failed,
}

impl Outcome {
    pub fn from_counts(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (_, 0) if succeeded > 0 => Self::Complete,
            (0, _) => Self::Failed,
            _ => Self::Partial,
        }
    }
}

/// Per-item results collected while applying a multi-item request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemResults {
    /// Names of the items that were applied
    pub message: Vec<String>,
    /// One message per rejected item
    pub errors: Vec<String>,
}

impl ItemResults {
    pub fn succeed(&mut self, item: impl Into<String>) {
        self.message.push(item.into());
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_counts(self.message.len(), self.errors.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_action_from_str() {
        assert_eq!("enroll".parse(), Ok(EnrollmentAction::Enroll));
        assert_eq!("unenroll".parse(), Ok(EnrollmentAction::Unenroll));
        assert!("drop".parse::<EnrollmentAction>().is_err());
        assert!("".parse::<EnrollmentAction>().is_err());
    }

    #[test]
    fn test_report_state() {
        assert_eq!(ReportState::of(false, 0), ReportState::Empty);
        assert_eq!(ReportState::of(false, 3), ReportState::Open);
        assert_eq!(ReportState::of(true, 0), ReportState::Approved);
    }

    #[test]
    fn test_report_message_prefers_rejection_reason() {
        let msg = ReportState::Open.message(Some("too many credits"));
        assert!(msg.contains("too many credits"));

        let msg = ReportState::Approved.message(Some("stale"));
        assert!(!msg.contains("stale"));
    }

    #[test]
    fn test_outcome() {
        assert_eq!(Outcome::from_counts(2, 0), Outcome::Complete);
        assert_eq!(Outcome::from_counts(1, 1), Outcome::Partial);
        assert_eq!(Outcome::from_counts(0, 2), Outcome::Failed);
        assert_eq!(Outcome::from_counts(0, 0), Outcome::Failed);
    }

    #[test]
    fn test_item_results() {
        let mut results = ItemResults::default();
        results.succeed("Compilers");
        assert_eq!(results.outcome(), Outcome::Complete);

        results.fail("already enrolled in Networks");
        assert_eq!(results.outcome(), Outcome::Partial);
        assert_eq!(results.message, vec!["Compilers".to_string()]);
    }
}
