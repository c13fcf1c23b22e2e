use crate::demo::{run_admin, run_browse, run_demo, run_export, AdminCommand, BrowseArgs, ExportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use skillswap::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SkillSwap",
    about = "Run the SkillSwap marketplace service or explore the demo data from the command line",
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
    /// Search the public member directory
    Browse(BrowseArgs),
    /// Inspect accounts, reports, and platform statistics
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Print one of the admin CSV reports
    Export(ExportArgs),
    /// Walk through browsing, profile editing, and moderation on the demo data
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Start with an empty store instead of the demo members
    #[arg(long)]
    pub(crate) empty: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Browse(args) => run_browse(args),
        Command::Admin { command } => run_admin(command),
        Command::Export(args) => run_export(args),
        Command::Demo => run_demo(),
    }
}
