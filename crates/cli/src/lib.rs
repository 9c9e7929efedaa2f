pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "permit",
    about = "Permit form filler operator CLI",
    long_about = "Inspect configuration, check readiness, browse the permit catalog, \
                  and invoke permit tools without an MCP client.",
    after_help = "Examples:\n  permit doctor --json\n  permit permits\n  \
                  permit call identify_required_permits --args '{\"projectDescription\":\"new deck\"}'"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, rule catalog, templates, and output directory")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List the permit types in the configured rule catalog")]
    Permits,
    #[command(about = "Invoke one permit tool and print its result")]
    Call {
        #[arg(help = "Tool name, e.g. identify_required_permits")]
        tool: String,
        #[arg(long, help = "Tool arguments as a JSON object")]
        args: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Permits => commands::permits::run(),
        Command::Call { tool, args } => commands::call::run(&tool, args.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
