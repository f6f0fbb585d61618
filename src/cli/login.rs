use clap::Args;

use crate::cli::Session;
use crate::core::redirect;
use crate::Result;

/// Log in and establish a session
#[derive(Args, Debug)]
pub struct LoginCommand {
    /// Account username
    #[arg(long, env = "CUSTODIA_USERNAME")]
    username: String,
    /// Account password
    #[arg(long, env = "CUSTODIA_PASSWORD")]
    password: String,
}

impl LoginCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        let principal = session.handle.login(self.username, self.password).await?;

        println!(
            "Logged in as {} -> {}",
            principal.username,
            redirect::home(Some(&principal)).path()
        );

        Ok(())
    }
}
