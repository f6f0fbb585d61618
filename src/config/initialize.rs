use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::time::Duration;

use crate::backend::MockBackend;
use crate::common::debug;
use crate::config::{filepath, Config};
use crate::core::{Builder, Resolver, SessionHandle};
use crate::store::FileSlot;
use crate::{CustodiaError, Result};

#[derive(Debug)]
pub struct Initializer {
    pub config: Config,
}

impl Initializer {
    pub async fn load_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let f = fs::File::open(path).await?;
        let config = serde_yaml::from_reader::<_, Config>(f.into_std().await)?;

        Ok(Self { config })
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn set_root_dir(&mut self, path: impl Into<PathBuf>) {
        self.config.session.set_root_dir(&mut Some(path.into()));
    }

    pub fn poll_interval(&self) -> Duration {
        self.config.poll.interval()
    }

    pub async fn init_dir(&self) -> Result<()> {
        let root_dir = self.root_dir()?;
        fs::create_dir_all(root_dir.join(filepath::SESSION_DIR)).await?;
        fs::create_dir_all(root_dir.join(filepath::BACKEND_DIR)).await?;
        Ok(())
    }

    // Build the session core and spawn its run loop. The slot is loaded
    // during build, so a session stored by a previous invocation is
    // current immediately.
    pub async fn run_session(self) -> Result<(SessionHandle, Resolver)> {
        let root_dir = self.root_dir()?;

        let slot = Arc::new(FileSlot::new(root_dir.join(filepath::SESSION_DIR)));

        let seed = if self.config.backend.users.is_empty() {
            debug!("No seed users configured, using simulation defaults");
            MockBackend::default_users()
        } else {
            self.config.backend.users
        };
        let backend = Arc::new(
            MockBackend::open(root_dir.join(filepath::BACKEND_DIR), seed).await?,
        );

        let (core, handle, resolver) = Builder::new().slot(slot).backend(backend).build().await?;

        tokio::spawn(core.run());

        Ok((handle, resolver))
    }

    fn root_dir(&self) -> Result<PathBuf> {
        self.config
            .session
            .root_dir
            .clone()
            .ok_or_else(|| CustodiaError::Internal("profile root_dir not set".to_owned()))
    }
}
