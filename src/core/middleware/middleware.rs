use async_trait::async_trait;

use crate::core::middleware::RequestContext;
use crate::core::UnitOfWork;
use crate::Result;

#[async_trait]
pub(crate) trait Middleware {
    async fn apply(&mut self, ctx: RequestContext, uow: UnitOfWork) -> Result<()>;
}
