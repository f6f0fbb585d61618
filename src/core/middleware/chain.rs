use crate::core::middleware::{Decorator, Dispatcher, Gatekeeper, Logger, Middleware, RequestContext};
use crate::core::UnitOfWork;
use crate::Result;

pub(crate) struct MiddlewareChain {
    root: Logger<Gatekeeper<Decorator<Dispatcher>>>,
}

impl MiddlewareChain {
    pub(crate) fn new(dispatcher: Dispatcher) -> Self {
        let decorator = Decorator::new(dispatcher);

        let gatekeeper = Gatekeeper::new(decorator);

        let logger = Logger::new(gatekeeper);

        Self { root: logger }
    }

    pub(crate) async fn apply(&mut self, ctx: RequestContext, uow: UnitOfWork) -> Result<()> {
        self.root.apply(ctx, uow).await
    }
}
