//! porclr CLI
//!
//! Mirrors the Compose files of Portainer stacks into a local directory.

mod cli;
mod commands;
mod error;
mod interactive;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, ConfigAction};
use commands::Invocation;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{}: {}", "hint".yellow().bold(), hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        // Only fails if a subscriber is already installed.
        let _ = tracing::subscriber::set_global_default(subscriber);
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config),
        None => {
            println!(
                "{} Portainer Compose mirror",
                "porclr".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "porclr --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: Option<std::path::PathBuf>) -> Result<()> {
    match cmd {
        Commands::Link {
            path,
            compose_dir,
            connection,
        } => commands::run_link(Invocation {
            config,
            path,
            compose_dir,
            connection,
        }),
        Commands::Copy { path, connection } => commands::run_copy(Invocation {
            config,
            path,
            compose_dir: None,
            connection,
        }),
        Commands::Scan { path, compose_dir } => commands::run_scan(Invocation {
            config,
            path,
            compose_dir,
            connection: Default::default(),
        }),
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => commands::run_config_show(config.as_deref(), json),
            ConfigAction::Path => commands::run_config_path(config.as_deref()),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "porclr", &mut std::io::stdout());
            Ok(())
        }
    }
}
