use std::path::PathBuf;

use serde::Deserialize;
use tokio::time::Duration;

use crate::backend::UserEntry;

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

// Where the profile lives. One profile directory holds one session slot
// and the mock backend state, so there is a single active session per
// profile.
#[derive(Deserialize, Debug, Default)]
pub struct SessionConfig {
    pub root_dir: Option<PathBuf>,
}

impl SessionConfig {
    pub fn set_root_dir(&mut self, val: &mut Option<PathBuf>) {
        if let Some(val) = val.take() {
            self.root_dir = Some(val)
        }
    }
}

// Seed accounts for the mock backend. Empty means the standard simulation
// accounts are used.
#[derive(Deserialize, Debug, Default)]
pub struct BackendConfig {
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PollConfig {
    // Pending-user poll period.
    interval_seconds: Option<u64>,
}

impl PollConfig {
    const DEFAULT_INTERVAL_SECONDS: u64 = 60;

    pub fn set_interval_seconds(&mut self, val: Option<u64>) {
        if let Some(val) = val {
            self.interval_seconds = Some(std::cmp::max(val, 1));
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(
            self.interval_seconds
                .unwrap_or(PollConfig::DEFAULT_INTERVAL_SECONDS),
        )
    }
}
