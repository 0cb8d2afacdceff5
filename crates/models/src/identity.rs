use serde::{Deserialize, Serialize};

/// Role reported to clients after login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "HOD")]
    Hod,
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hod => "HOD",
            Self::Student => "Student",
            Self::Admin => "Admin",
        }
    }
}

/// An authenticated user together with the scope their role grants.
///
/// Resolved once per request from the bearer token: a user with a HOD row is
/// a [`Principal::Hod`], otherwise a user with a student row is a
/// [`Principal::Student`], and everybody else is an [`Principal::Admin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role")]
pub enum Principal {
    Admin {
        user_id: i32,
    },
    #[serde(rename = "HOD")]
    Hod {
        user_id: i32,
        hod_id: i32,
        department_id: i32,
    },
    Student {
        user_id: i32,
        student_id: i32,
        department_id: i32,
        program_id: i32,
        batch_id: i32,
    },
}

impl Principal {
    pub fn user_id(&self) -> i32 {
        match self {
            Self::Admin { user_id }
            | Self::Hod { user_id, .. }
            | Self::Student { user_id, .. } => *user_id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Admin { .. } => Role::Admin,
            Self::Hod { .. } => Role::Hod,
            Self::Student { .. } => Role::Student,
        }
    }

    /// Department the principal is scoped to, `None` for admins
    pub fn department_id(&self) -> Option<i32> {
        match self {
            Self::Admin { .. } => None,
            Self::Hod { department_id, .. } | Self::Student { department_id, .. } => {
                Some(*department_id)
            }
        }
    }

    /// Admins manage every department, HODs only their own
    pub fn manages_department(&self, department_id: i32) -> bool {
        match self {
            Self::Admin { .. } => true,
            Self::Hod {
                department_id: own, ..
            } => *own == department_id,
            Self::Student { .. } => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_role_of_principal() {
        let admin = Principal::Admin { user_id: 1 };
        let hod = Principal::Hod {
            user_id: 2,
            hod_id: 1,
            department_id: 7,
        };
        let student = Principal::Student {
            user_id: 3,
            student_id: 1,
            department_id: 7,
            program_id: 2,
            batch_id: 4,
        };

        assert_eq!(admin.role(), Role::Admin);
        assert_eq!(hod.role(), Role::Hod);
        assert_eq!(student.role(), Role::Student);
        assert_eq!(student.user_id(), 3);
        assert_eq!(admin.department_id(), None);
        assert_eq!(hod.department_id(), Some(7));
    }

    #[test]
    fn test_manages_department() {
        let hod = Principal::Hod {
            user_id: 2,
            hod_id: 1,
            department_id: 7,
        };
        assert!(hod.manages_department(7));
        assert!(!hod.manages_department(8));
        assert!(Principal::Admin { user_id: 1 }.manages_department(8));
    }

    #[test]
    fn test_role_serializes_like_login_user_type() {
        assert_eq!(serde_json::to_string(&Role::Hod).unwrap(), "\"HOD\"");
        assert_eq!(Role::Student.as_str(), "Student");
    }
}
