pub mod commands;
pub mod logging;
pub mod render;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::browse::BrowseArgs;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront catalog browser",
    long_about = "Load the product catalog once, apply the launch discount, and filter it by title search and category.",
    after_help = "Examples:\n  storefront browse --search shirt\n  storefront browse --category electronics --format json\n  storefront interactive\n  storefront doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Load the catalog once and render the filtered product grid")]
    Browse(BrowseArgs),
    #[command(
        about = "Load the catalog once, then read `search`, `category`, `clear` and `quit` lines from stdin"
    )]
    Interactive,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and catalog endpoint readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init_from_env();

    let result = match cli.command {
        Command::Browse(args) => commands::browse::run(args),
        Command::Interactive => commands::interactive::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
