use crate::demo::{run_application_list, run_demo, ApplicationListArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fundmatch::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fundmatch Funder Desk",
    about = "Serve and explore the funder application desk from the command line",
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
    /// Browse funding applications
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// Walk through grants, table views and a bulk approval
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// Print one page of the application table
    List(ApplicationListArgs),
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
        Command::Applications {
            command: ApplicationsCommand::List(args),
        } => run_application_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
