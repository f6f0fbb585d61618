pub mod assign;
pub mod home;
pub mod login;
pub mod logout;
pub mod register;
pub mod root;
pub mod route;
pub mod status;
pub mod users;
pub mod whoami;

pub use root::parse;

use tokio::fs;
use tokio::time::Duration;

use crate::cli::root::CommonOptions;
use crate::config::{Config, Initializer};
use crate::core::{Resolver, SessionHandle};
use crate::Result;

// Everything a subcommand needs to talk to the session core.
pub struct Session {
    pub handle: SessionHandle,
    pub resolver: Resolver,
    pub poll_interval: Duration,
}

// Bootstrap the session core for the configured profile. A missing config
// file is not an error; the defaults stand in for it.
pub async fn build_session(options: &CommonOptions) -> Result<Session> {
    let mut initializer = if fs::metadata(&options.config).await.is_ok() {
        Initializer::load_config_file(&options.config).await?
    } else {
        Initializer::from_config(Config::default())
    };

    initializer.set_root_dir(options.dir.clone());
    initializer.init_dir().await?;

    let poll_interval = initializer.poll_interval();
    let (handle, resolver) = initializer.run_session().await?;

    Ok(Session {
        handle,
        resolver,
        poll_interval,
    })
}
