use clap::Args;

use crate::cli::Session;
use crate::core::redirect;
use crate::Result;

/// Show the home dashboard for the current principal
#[derive(Args, Debug)]
pub struct HomeCommand {}

impl HomeCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        let current = session.resolver.current();

        println!("{}", redirect::home(current.as_ref()).path());

        Ok(())
    }
}
