#![allow(clippy::module_inception)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod store;

pub use crate::error::CustodiaError;
pub type Result<T, E = crate::error::CustodiaError> = std::result::Result<T, E>;

pub use crate::core::principal::{Principal, Role, SessionToken, Status};

pub(crate) mod common {
    #[allow(unused_imports)]
    pub(crate) use crate::error::internal::{Error, ErrorKind};

    pub use crate::error::CustodiaError;

    #[allow(unused_imports)]
    pub use tracing::{debug, error, info, trace, warn};
}
