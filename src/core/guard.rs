use crate::core::principal::{has_any, Principal, Role};

// Pages a navigation can be redirected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Unauthorized,
    PendingAssignment,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "/login",
            Page::Unauthorized => "/unauthorized",
            Page::PendingAssignment => "/pending-role-assignment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    // Terminal pages always render. A redirected principal needs somewhere
    // to land, so these are exempt even from the suspension check.
    Terminal,
    Public,
    AnyOf(&'static [Role]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Render,
    Redirect(Page),
}

pub struct RouteRule {
    pub pattern: &'static str,
    pub access: Access,
}

// The navigable paths and their required roles, as data. First match wins,
// so literal segments precede `:` placeholders at the same depth.
pub const ROUTES: &[RouteRule] = &[
    RouteRule {
        pattern: "/login",
        access: Access::Public,
    },
    RouteRule {
        pattern: "/register",
        access: Access::Public,
    },
    RouteRule {
        pattern: "/admin-dashboard",
        access: Access::AnyOf(&[Role::Admin]),
    },
    RouteRule {
        pattern: "/medical-dashboard",
        access: Access::AnyOf(&[Role::Medical]),
    },
    RouteRule {
        pattern: "/personnel-dashboard",
        access: Access::AnyOf(&[Role::Personnel]),
    },
    RouteRule {
        pattern: "/detainees",
        access: Access::AnyOf(&[Role::Admin, Role::Personnel]),
    },
    RouteRule {
        pattern: "/detainees/new",
        access: Access::AnyOf(&[Role::Admin, Role::Personnel]),
    },
    RouteRule {
        pattern: "/detainees/edit/:id",
        access: Access::AnyOf(&[Role::Admin, Role::Personnel]),
    },
    RouteRule {
        pattern: "/detainees/:id",
        access: Access::AnyOf(&[Role::Admin, Role::Personnel, Role::Medical]),
    },
    RouteRule {
        pattern: "/incidents",
        access: Access::AnyOf(&[Role::Admin, Role::Personnel]),
    },
    RouteRule {
        pattern: "/incidents/new",
        access: Access::AnyOf(&[Role::Admin, Role::Personnel]),
    },
    RouteRule {
        pattern: "/planning",
        access: Access::AnyOf(&[Role::Admin, Role::Personnel, Role::Medical]),
    },
    RouteRule {
        pattern: "/unauthorized",
        access: Access::Terminal,
    },
    RouteRule {
        pattern: "/pending-role-assignment",
        access: Access::Terminal,
    },
];

pub fn lookup(path: &str) -> Option<&'static RouteRule> {
    ROUTES.iter().find(|rule| matches(rule.pattern, path))
}

fn matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = segments(pattern);
    let mut path_segments = segments(path);

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p.starts_with(':') || p == s => continue,
            _ => return false,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

// The per-navigation decision function. Synchronous, total and free of
// side effects. The check order is load bearing: suspension precedes
// role sufficiency, and "no roles yet" is distinguished from "wrong
// roles" since they redirect to different pages.
pub fn authorize(principal: Option<&Principal>, access: Access) -> Decision {
    let required = match access {
        Access::Terminal => return Decision::Render,
        Access::Public => None,
        Access::AnyOf(required) => Some(required),
    };

    let principal = match principal {
        Some(principal) => principal,
        None => return Decision::Redirect(Page::Login),
    };

    if principal.is_suspended() {
        return Decision::Redirect(Page::Unauthorized);
    }

    let required = match required {
        // Public route, any live principal may render it.
        None => return Decision::Render,
        Some(required) => required,
    };

    if principal.is_pending_assignment() {
        return Decision::Redirect(Page::PendingAssignment);
    }

    if has_any(Some(principal), required) {
        Decision::Render
    } else {
        Decision::Redirect(Page::Unauthorized)
    }
}

// Table lookup plus decision. `None` means the path is not navigable.
// A redirect whose destination is the requested page itself collapses to
// a render, so `/login` renders for an anonymous principal. The collapse
// is the only exemption: an anonymous visit to `/register` still bounces
// to `/login` because the anonymous check precedes the public one.
pub fn decide(principal: Option<&Principal>, path: &str) -> Option<Decision> {
    let rule = lookup(path)?;
    let decision = authorize(principal, rule.access);

    Some(match decision {
        Decision::Redirect(page) if page.path() == rule.pattern => Decision::Render,
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::principal::Status;

    fn principal(roles: &[Role], status: Status) -> Principal {
        Principal {
            id: 7,
            username: "user".into(),
            email: "user@facility.gov".into(),
            roles: roles.iter().copied().collect(),
            status,
            token: "token".into(),
        }
    }

    #[test]
    fn anonymous_gated_path_redirects_to_login() {
        assert_eq!(
            decide(None, "/planning"),
            Some(Decision::Redirect(Page::Login))
        );
    }

    #[test]
    fn anonymous_login_page_renders() {
        // redirect-to-self collapses
        assert_eq!(decide(None, "/login"), Some(Decision::Render));
        // but the collapse does not extend to other public pages
        assert_eq!(
            decide(None, "/register"),
            Some(Decision::Redirect(Page::Login))
        );
    }

    #[test]
    fn suspended_redirects_everywhere_except_terminal_pages() {
        let p = principal(&[Role::Admin], Status::Suspended);
        for rule in ROUTES {
            let expected = match rule.access {
                Access::Terminal => Decision::Render,
                _ => Decision::Redirect(Page::Unauthorized),
            };
            assert_eq!(
                authorize(Some(&p), rule.access),
                expected,
                "pattern {}",
                rule.pattern
            );
        }
    }

    #[test]
    fn pending_assignment_redirects_from_gated_paths() {
        let p = principal(&[], Status::Active);
        assert_eq!(
            decide(Some(&p), "/admin-dashboard"),
            Some(Decision::Redirect(Page::PendingAssignment))
        );
        assert_eq!(
            decide(Some(&p), "/detainees/3"),
            Some(Decision::Redirect(Page::PendingAssignment))
        );
        // but public and terminal pages still render
        assert_eq!(decide(Some(&p), "/register"), Some(Decision::Render));
        assert_eq!(
            decide(Some(&p), "/pending-role-assignment"),
            Some(Decision::Render)
        );
    }

    #[test]
    fn personnel_reaches_detainee_file_view() {
        let p = principal(&[Role::Personnel], Status::Active);
        assert_eq!(decide(Some(&p), "/detainees/7"), Some(Decision::Render));
    }

    #[test]
    fn medical_is_excluded_from_detainee_edit() {
        let p = principal(&[Role::Medical], Status::Active);
        assert_eq!(
            decide(Some(&p), "/detainees/edit/7"),
            Some(Decision::Redirect(Page::Unauthorized))
        );
        // read-only file view is allowed
        assert_eq!(decide(Some(&p), "/detainees/7"), Some(Decision::Render));
    }

    #[test]
    fn wrong_roles_differ_from_no_roles() {
        let medical = principal(&[Role::Medical], Status::Active);
        let pending = principal(&[], Status::Active);
        assert_eq!(
            decide(Some(&medical), "/incidents"),
            Some(Decision::Redirect(Page::Unauthorized))
        );
        assert_eq!(
            decide(Some(&pending), "/incidents"),
            Some(Decision::Redirect(Page::PendingAssignment))
        );
    }

    #[test]
    fn literal_segments_win_over_placeholders() {
        let p = principal(&[Role::Personnel], Status::Active);
        // `/detainees/new` must hit the create rule, not `/detainees/:id`.
        let rule = lookup("/detainees/new").unwrap();
        assert_eq!(rule.pattern, "/detainees/new");
        assert_eq!(decide(Some(&p), "/detainees/new"), Some(Decision::Render));
    }

    #[test]
    fn unknown_path_has_no_rule() {
        assert!(decide(None, "/nope").is_none());
        assert!(decide(None, "/detainees/7/extra").is_none());
    }

    #[test]
    fn trailing_slash_matches() {
        assert!(lookup("/planning/").is_some());
    }
}
