use async_trait::async_trait;

use crate::common::info;
use crate::core::middleware::{Middleware, RequestContext};
use crate::core::principal::{has_any, Role};
use crate::core::UnitOfWork;
use crate::{CustodiaError, Result};

// Client side pre-check for administrative mutations. Rejects before any
// backend call is made; the backend re-checks independently.
pub(crate) struct Gatekeeper<MW> {
    next: MW,
}

impl<MW> Gatekeeper<MW> {
    pub(crate) fn new(next: MW) -> Self {
        Self { next }
    }
}

#[async_trait]
impl<MW> Middleware for Gatekeeper<MW>
where
    MW: Middleware + Send + 'static,
{
    async fn apply(&mut self, ctx: RequestContext, uow: UnitOfWork) -> Result<()> {
        let admin_required = matches!(
            uow,
            UnitOfWork::ListUsers(_) | UnitOfWork::AssignRoles(_) | UnitOfWork::SetStatus(_)
        );

        if admin_required && !has_any(ctx.acting.as_ref(), &[Role::Admin]) {
            info!(uow = ?uow, "Administrative action denied");
            return deny(uow);
        }

        self.next.apply(ctx, uow).await
    }
}

fn deny(uow: UnitOfWork) -> Result<()> {
    match uow {
        UnitOfWork::ListUsers(mut work) => {
            work.send_response(Err(CustodiaError::AdministrativeActionDenied))
        }
        UnitOfWork::AssignRoles(mut work) => {
            work.send_response(Err(CustodiaError::AdministrativeActionDenied))
        }
        UnitOfWork::SetStatus(mut work) => {
            work.send_response(Err(CustodiaError::AdministrativeActionDenied))
        }
        // only administrative work is denied here
        _ => Ok(()),
    }
}
