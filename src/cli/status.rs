use clap::Args;

use crate::cli::Session;
use crate::core::principal::Status;
use crate::Result;

/// Update a user account status (admin)
#[derive(Args, Debug)]
pub struct SetStatusCommand {
    /// Target user id
    user_id: u64,
    /// New status (active | suspended)
    status: Status,
}

impl SetStatusCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        let record = session
            .handle
            .set_status(self.user_id, self.status)
            .await?;

        println!("Updated {}: status={}", record.username, record.status);

        Ok(())
    }
}
