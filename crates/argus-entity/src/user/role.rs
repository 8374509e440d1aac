//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the monitoring hierarchy.
///
/// Roles are ordered by privilege level:
/// SuperAdmin > Admin > Supervisor > Employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full system administrator.
    SuperAdmin,
    /// Can monitor and command every employee.
    Admin,
    /// Can monitor and command their own supervisees.
    Supervisor,
    /// A monitored employee running the desktop agent.
    Employee,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::SuperAdmin => 4,
            Self::Admin => 3,
            Self::Supervisor => 2,
            Self::Employee => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin or higher.
    pub fn is_admin(&self) -> bool {
        self.has_at_least(&Self::Admin)
    }

    /// Check if this role can operate monitoring controls at all.
    pub fn is_operator(&self) -> bool {
        self.has_at_least(&Self::Supervisor)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Supervisor => "supervisor",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = argus_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "supervisor" => Ok(Self::Supervisor),
            "employee" => Ok(Self::Employee),
            _ => Err(argus_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: super_admin, admin, supervisor, employee"
            ))),
        }
    }
}
