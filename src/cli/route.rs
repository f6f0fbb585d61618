use clap::Args;

use crate::cli::Session;
use crate::core::guard::{self, Decision};
use crate::Result;

/// Show the guard decision for a path
#[derive(Args, Debug)]
pub struct RouteCommand {
    /// Path to check, e.g. /detainees/42
    path: String,
}

impl RouteCommand {
    pub async fn run(self, session: &Session) -> Result<()> {
        let current = session.resolver.current();

        match guard::decide(current.as_ref(), &self.path) {
            None => println!("{}: no such route", self.path),
            Some(Decision::Render) => println!("{}: render", self.path),
            Some(Decision::Redirect(page)) => {
                println!("{}: redirect -> {}", self.path, page.path())
            }
        }

        Ok(())
    }
}
