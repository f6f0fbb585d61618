use async_trait::async_trait;

use crate::core::middleware::{Middleware, RequestContext};
use crate::core::UnitOfWork;
use crate::Result;

// The single place the session token is attached to outgoing work.
pub(crate) struct Decorator<MW> {
    next: MW,
}

impl<MW> Decorator<MW> {
    pub(crate) fn new(next: MW) -> Self {
        Self { next }
    }
}

#[async_trait]
impl<MW> Middleware for Decorator<MW>
where
    MW: Middleware + Send + 'static,
{
    async fn apply(&mut self, mut ctx: RequestContext, uow: UnitOfWork) -> Result<()> {
        ctx.token = ctx.acting.as_ref().map(|principal| principal.token.clone());
        self.next.apply(ctx, uow).await
    }
}
