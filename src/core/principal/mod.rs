mod role;
pub use role::{has_any, ParseRoleError, Role};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Opaque credential blob issued by the backend. Attached to outgoing
// requests by the decorator middleware and discarded on logout.
pub type SessionToken = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    Suspended,
}

impl Default for Status {
    fn default() -> Self {
        Status::Active
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Active => write!(f, "ACTIVE"),
            Status::Suspended => write!(f, "SUSPENDED"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Status::Active),
            "SUSPENDED" => Ok(Status::Suspended),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

// The authenticated identity driving every authorization decision.
// At most one principal is current at any time; it materializes on
// successful login and is destroyed on logout or forced logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: u64,
    pub username: String,
    pub email: String,
    // Set semantics. Duplicates collapse and order never affects
    // authorization decisions.
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    pub status: Status,
    pub token: SessionToken,
}

impl Principal {
    pub fn is_suspended(&self) -> bool {
        matches!(self.status, Status::Suspended)
    }

    // Empty role set means the account awaits administrative assignment.
    pub fn is_pending_assignment(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
