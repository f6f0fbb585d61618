use clap::Args;

use crate::cli::Session;
use crate::core::principal::Role;
use crate::Result;

/// Assign roles to a user (admin)
#[derive(Args, Debug)]
pub struct AssignCommand {
    /// Target user id
    user_id: u64,
    /// Roles to assign, comma separated (admin,medical,personnel). An
    /// empty set revokes every role.
    #[arg(long, value_delimiter = ',')]
    roles: Vec<Role>,
}

impl AssignCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        let record = session
            .handle
            .assign_roles(self.user_id, self.roles.into_iter().collect())
            .await?;

        let roles = record
            .roles
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        println!(
            "Updated {}: roles={} status={}",
            record.username, roles, record.status
        );

        Ok(())
    }
}
