use crate::commands::{run_report, run_start, ReportArgs, StartArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use selfcheck_core::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "selfcheck",
    about = "Run weighted self-assessment questionnaires and score their answers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the working question list for a new session
    Start(StartArgs),
    /// Score an answer file against a catalog and print the report
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Start(args) => run_start(args),
        Command::Report(args) => run_report(args),
    }
}
