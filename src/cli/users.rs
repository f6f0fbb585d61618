use clap::Args;

use crate::cli::Session;
use crate::core::PendingWatcher;
use crate::Result;

/// List user accounts (admin)
#[derive(Args, Debug)]
pub struct UsersCommand {
    /// Show only accounts awaiting role assignment
    #[arg(long)]
    pending: bool,
    /// Keep polling the pending-account count until interrupted
    #[arg(long)]
    watch: bool,
}

impl UsersCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        if self.watch {
            return self.watch(session).await;
        }

        let users = session.handle.users().await?;

        for user in users
            .iter()
            .filter(|user| !self.pending || user.is_pending())
        {
            let roles = user
                .roles
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");

            println!(
                "{:<4} {:<16} {:<28} {:<10} {}",
                user.id, user.username, user.email, user.status, roles
            );
        }

        Ok(())
    }

    async fn watch(&self, session: &Session) -> Result<()> {
        // Probe once so an expired session fails here instead of being
        // silently swallowed by the background task.
        session.handle.users().await?;

        let mut watcher = PendingWatcher::spawn(session.handle.clone(), session.poll_interval);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = watcher.changed() => {
                    println!("pending accounts: {}", watcher.pending_count());
                }
            }
        }

        watcher.cancel();

        Ok(())
    }
}
