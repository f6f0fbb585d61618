use clap::Args;

use crate::cli::Session;
use crate::Result;

/// Clear the current session
#[derive(Args, Debug)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        session.handle.logout().await?;

        println!("Logged out");

        Ok(())
    }
}
