use clap::Args;

use crate::cli::Session;
use crate::Result;

/// Show the current principal
#[derive(Args, Debug)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        match session.resolver.current() {
            Some(principal) => {
                let roles = principal
                    .roles
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                let roles = if roles.is_empty() {
                    "(pending assignment)".to_owned()
                } else {
                    roles
                };

                println!(
                    "{} <{}> roles={} status={}",
                    principal.username, principal.email, roles, principal.status
                );
            }
            None => println!("Not logged in"),
        }

        Ok(())
    }
}
