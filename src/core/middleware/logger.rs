use async_trait::async_trait;

use crate::common::info;
use crate::core::middleware::{Middleware, RequestContext};
use crate::core::UnitOfWork;
use crate::Result;

pub(crate) struct Logger<MW> {
    next: MW,
}

impl<MW> Logger<MW> {
    pub(crate) fn new(next: MW) -> Self {
        Self { next }
    }
}

#[async_trait]
impl<MW> Middleware for Logger<MW>
where
    MW: Middleware + Send + 'static,
{
    async fn apply(&mut self, ctx: RequestContext, uow: UnitOfWork) -> Result<()> {
        let start = tokio::time::Instant::now();
        let log = format!("{:?}", uow);
        let acting = ctx
            .acting
            .as_ref()
            .map(|principal| principal.username.clone());

        let result = self.next.apply(ctx, uow).await;

        info!(uow = %log, ?acting, elapsed = ?start.elapsed(), ?result, "Uow done");

        result
    }
}
