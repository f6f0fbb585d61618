use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::principal::Principal;

// Coarse capability tag granted administratively. Closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Medical,
    Personnel,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Medical => write!(f, "MEDICAL"),
            Role::Personnel => write!(f, "PERSONNEL"),
        }
    }
}

#[derive(Debug)]
pub struct ParseRoleError(String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MEDICAL" => Ok(Role::Medical),
            "PERSONNEL" => Ok(Role::Personnel),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

// The single membership test every authorization decision funnels through.
//
// True iff the required set is empty (public) or the principal holds at
// least one of the required roles. An absent principal satisfies only the
// public case.
pub fn has_any(principal: Option<&Principal>, required: &[Role]) -> bool {
    if required.is_empty() {
        return true;
    }
    principal.map_or(false, |principal| {
        required.iter().any(|role| principal.roles.contains(role))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::principal::Status;

    fn principal(roles: &[Role]) -> Principal {
        Principal {
            id: 1,
            username: "user".into(),
            email: "user@facility.gov".into(),
            roles: roles.iter().copied().collect(),
            status: Status::Active,
            token: "token".into(),
        }
    }

    #[test]
    fn empty_required_is_public() {
        assert!(has_any(None, &[]));
        assert!(has_any(Some(&principal(&[])), &[]));
    }

    #[test]
    fn absent_principal_never_matches() {
        assert!(!has_any(None, &[Role::Admin]));
    }

    #[test]
    fn membership_is_intersection() {
        let p = principal(&[Role::Personnel]);
        assert!(has_any(Some(&p), &[Role::Admin, Role::Personnel]));
        assert!(!has_any(Some(&p), &[Role::Admin, Role::Medical]));
    }

    #[test]
    fn commutative_over_required_order() {
        let p = principal(&[Role::Medical]);
        assert_eq!(
            has_any(Some(&p), &[Role::Admin, Role::Medical]),
            has_any(Some(&p), &[Role::Medical, Role::Admin]),
        );
    }

    #[test]
    fn duplicates_collapse() {
        // Insertion order and repetition do not matter. BTreeSet collapses
        // both, so two differently built principals compare equal.
        let mut a = principal(&[Role::Admin, Role::Personnel]);
        let b = principal(&[Role::Personnel, Role::Admin, Role::Personnel]);
        a.roles.insert(Role::Admin);
        assert_eq!(a.roles, b.roles);
    }

    #[test]
    fn empty_roles_is_pending() {
        assert!(principal(&[]).is_pending_assignment());
        assert!(!principal(&[Role::Admin]).is_pending_assignment());
    }

    #[test]
    fn role_round_trips_through_serde() {
        let json = serde_json::to_string(&Role::Medical).unwrap();
        assert_eq!(json, "\"MEDICAL\"");
        assert_eq!(serde_json::from_str::<Role>(&json).unwrap(), Role::Medical);
    }
}
