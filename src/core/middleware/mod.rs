mod chain;
pub(crate) use self::chain::MiddlewareChain;

mod middleware;
pub(crate) use self::middleware::Middleware;

mod context;
pub(crate) use self::context::RequestContext;

mod gatekeeper;
pub(crate) use self::gatekeeper::Gatekeeper;

mod decorator;
pub(crate) use self::decorator::Decorator;

mod logger;
pub(crate) use self::logger::Logger;

mod dispatcher;
pub(crate) use self::dispatcher::Dispatcher;
