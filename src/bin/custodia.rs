use custodia::cli::{self, root::Command};
use custodia::CustodiaError;

fn main() {
    // Install global collector configured based on CUSTODIA_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("CUSTODIA_LOG"))
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_thread_ids(true)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .on_thread_start(|| tracing::trace!("thread start"))
        .on_thread_stop(|| tracing::trace!("thread stop"))
        .enable_io()
        .enable_time()
        .build()
        .unwrap()
        .block_on(async {
            run().await;
        })
}

async fn run() {
    if let Err(err) = run_inner().await {
        let code = match err {
            CustodiaError::InvalidCredentials => {
                eprintln!("invalid credentials");
                2
            }
            CustodiaError::Unauthenticated => {
                eprintln!("not logged in");
                2
            }
            CustodiaError::SessionExpired => {
                eprintln!("session expired, please log in again");
                2
            }
            CustodiaError::AdministrativeActionDenied => {
                eprintln!("administrator role required");
                3
            }
            _ => {
                eprintln!("{}", err);
                1
            }
        };
        std::process::exit(code);
    };
}

async fn run_inner() -> custodia::Result<()> {
    let command = cli::parse();
    let session = cli::build_session(&command.options).await?;

    match command.command {
        Command::Login(cmd) => cmd.run(&session).await,
        Command::Logout(cmd) => cmd.run(&session).await,
        Command::Register(cmd) => cmd.run(&session).await,
        Command::Whoami(cmd) => cmd.run(&session).await,
        Command::Route(cmd) => cmd.run(&session).await,
        Command::Home(cmd) => cmd.run(&session).await,
        Command::Users(cmd) => cmd.run(&session).await,
        Command::Assign(cmd) => cmd.run(&session).await,
        Command::SetStatus(cmd) => cmd.run(&session).await,
    }
}
