use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli::{assign, home, login, logout, register, route, status, users, whoami};

/// Custodia command
#[derive(Parser, Debug)]
#[command(version, propagate_version = true, subcommand_required = true)]
pub struct CustodiaCommand {
    /// Profile options
    #[command(flatten)]
    pub options: CommonOptions,
    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Profile options
#[derive(Args, Debug)]
pub struct CommonOptions {
    /// Profile directory holding the session slot and mock backend state
    #[arg(long, env = "CUSTODIA_DIR", default_value = ".custodia", global = true)]
    pub dir: PathBuf,
    /// Configuration file path
    #[arg(
        long,
        short = 'C',
        env = "CUSTODIA_CONFIG_PATH",
        default_value = "./files/config.yaml",
        global = true
    )]
    pub config: PathBuf,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and establish a session
    Login(login::LoginCommand),
    /// Clear the current session
    Logout(logout::LogoutCommand),
    /// Register a new account, pending role assignment
    Register(register::RegisterCommand),
    /// Show the current principal
    Whoami(whoami::WhoamiCommand),
    /// Show the guard decision for a path
    Route(route::RouteCommand),
    /// Show the home dashboard for the current principal
    Home(home::HomeCommand),
    /// List user accounts (admin)
    Users(users::UsersCommand),
    /// Assign roles to a user (admin)
    Assign(assign::AssignCommand),
    /// Update a user account status (admin)
    SetStatus(status::SetStatusCommand),
}

/// Parse command line args
pub fn parse() -> CustodiaCommand {
    CustodiaCommand::parse()
}
