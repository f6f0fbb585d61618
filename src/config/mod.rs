mod initialize;
pub use initialize::Initializer;

mod config;
pub use config::{BackendConfig, Config, PollConfig, SessionConfig};

pub(crate) mod filepath {
    pub const SESSION_DIR: &str = "session";
    pub const BACKEND_DIR: &str = "backend";
}
