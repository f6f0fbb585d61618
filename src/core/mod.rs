pub mod guard;
pub mod principal;
pub mod redirect;

mod session;
pub use self::session::{Builder, Resolver, SessionCore, SessionHandle};

mod poll;
pub use self::poll::PendingWatcher;

mod uow;
pub(crate) use self::uow::UnitOfWork;

mod middleware;
