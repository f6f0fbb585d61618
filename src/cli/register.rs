use clap::Args;

use crate::cli::Session;
use crate::Result;

/// Register a new account, pending role assignment
#[derive(Args, Debug)]
pub struct RegisterCommand {
    /// Account username
    #[arg(long)]
    username: String,
    /// Contact email
    #[arg(long)]
    email: String,
    /// Account password
    #[arg(long)]
    password: String,
}

impl RegisterCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        let record = session
            .handle
            .register(self.username, self.email, self.password)
            .await?;

        println!(
            "Registered {} (id {}). Awaiting role assignment by an administrator.",
            record.username, record.id
        );

        Ok(())
    }
}
