use crate::core::principal::{Principal, Role};

// Where a landing on the application root resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    Unauthorized,
    AdminDashboard,
    MedicalDashboard,
    PersonnelDashboard,
    PendingAssignment,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Login => "/login",
            Destination::Unauthorized => "/unauthorized",
            Destination::AdminDashboard => "/admin-dashboard",
            Destination::MedicalDashboard => "/medical-dashboard",
            Destination::PersonnelDashboard => "/personnel-dashboard",
            Destination::PendingAssignment => "/pending-role-assignment",
        }
    }
}

// Deterministic home pick for the root path, first match wins. Evaluated
// against the principal at time of arrival only; role changes do not
// re-route an already rendered view. Admin always wins over the other
// roles when a principal holds several.
pub fn home(principal: Option<&Principal>) -> Destination {
    let principal = match principal {
        Some(principal) => principal,
        None => return Destination::Login,
    };

    if principal.is_suspended() {
        Destination::Unauthorized
    } else if principal.has_role(Role::Admin) {
        Destination::AdminDashboard
    } else if principal.has_role(Role::Medical) {
        Destination::MedicalDashboard
    } else if principal.has_role(Role::Personnel) {
        Destination::PersonnelDashboard
    } else {
        // Role is a closed enum, so a non-empty set always matched above.
        Destination::PendingAssignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::principal::Status;

    fn principal(roles: &[Role], status: Status) -> Principal {
        Principal {
            id: 1,
            username: "user".into(),
            email: "user@facility.gov".into(),
            roles: roles.iter().copied().collect(),
            status,
            token: "token".into(),
        }
    }

    #[test]
    fn anonymous_goes_to_login() {
        assert_eq!(home(None), Destination::Login);
    }

    #[test]
    fn suspension_wins_over_any_role() {
        let p = principal(&[Role::Admin, Role::Medical], Status::Suspended);
        assert_eq!(home(Some(&p)), Destination::Unauthorized);
    }

    #[test]
    fn admin_wins_over_other_roles() {
        let p = principal(&[Role::Personnel, Role::Admin], Status::Active);
        assert_eq!(home(Some(&p)), Destination::AdminDashboard);

        let p = principal(&[Role::Medical, Role::Admin, Role::Personnel], Status::Active);
        assert_eq!(home(Some(&p)), Destination::AdminDashboard);
    }

    #[test]
    fn medical_wins_over_personnel() {
        let p = principal(&[Role::Personnel, Role::Medical], Status::Active);
        assert_eq!(home(Some(&p)), Destination::MedicalDashboard);
    }

    #[test]
    fn empty_roles_go_to_pending_assignment() {
        let p = principal(&[], Status::Active);
        assert_eq!(home(Some(&p)), Destination::PendingAssignment);
    }
}
