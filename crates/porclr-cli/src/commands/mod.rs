//! Command implementations for porclr-cli

pub mod config;
pub mod copy;
pub mod link;
pub mod scan;

use std::path::{Path, PathBuf};

use colored::Colorize;
use porclr_core::{Outcome, Settings, SyncConfig, SyncReport};
use porclr_fs::NormalizedPath;

use crate::cli::ConnectionArgs;
use crate::error::{CliError, Result};
use crate::interactive;

pub use config::{run_config_path, run_config_show};
pub use copy::run_copy;
pub use link::run_link;
pub use scan::run_scan;

/// Arguments shared by the sync commands, as parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub config: Option<PathBuf>,
    pub path: Option<PathBuf>,
    pub compose_dir: Option<PathBuf>,
    pub connection: ConnectionArgs,
}

impl Invocation {
    /// Settings given on the command line or through the environment.
    fn overrides(&self) -> Settings {
        Settings {
            url: self.connection.url.clone(),
            username: self.connection.username.clone(),
            local_root: self.path.clone(),
            portainer_compose_dir: self.compose_dir.clone(),
            ..Settings::default()
        }
    }

    /// Resolve file settings and overrides into an engine configuration.
    ///
    /// With `connect` set, a missing URL, username or password is prompted
    /// for.
    pub fn resolve(&self, connect: bool) -> Result<SyncConfig> {
        let mut settings = load_settings(self.config.as_deref())?.merge(self.overrides());

        if settings.local_root.is_none() {
            return Err(CliError::user(
                "No local directory given: pass PATH, set LINK_PARENT_DIR or local_root in the config file",
            ));
        }

        let mut password = None;
        if connect {
            let prompted = interactive::complete_connection(
                settings.url.take(),
                settings.username.take(),
                self.connection.password.clone(),
            )?;
            settings.url = Some(prompted.url);
            settings.username = Some(prompted.username);
            password = Some(prompted.password);
        }

        Ok(settings.into_sync_config(password)?)
    }
}

/// Load the settings file.
///
/// An explicit `path` must exist; the default location is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Ok(Settings::load(&NormalizedPath::new(path))?),
        None => Ok(Settings::load_default()?),
    }
}

/// Print one line per stack followed by the summary.
pub fn print_report(report: &SyncReport) {
    for entry in &report.entries {
        match &entry.outcome {
            Outcome::Created => println!(
                "   {} {} {}",
                "+".green(),
                entry.stack.cyan(),
                entry.path.as_str().dimmed()
            ),
            Outcome::Skipped => println!(
                "   {} {} {}",
                "=".dimmed(),
                entry.stack.cyan(),
                "already present".dimmed()
            ),
            Outcome::Unmapped { reason } => println!(
                "   {} {} {}",
                "?".yellow(),
                entry.path.as_str().cyan(),
                reason
            ),
        }
    }

    println!("{} {}", "OK".green().bold(), report.summary());
}

fn print_header(message: &str, root: &NormalizedPath) {
    println!("{} {} {}", "=>".blue().bold(), message, root.as_str().cyan());
}
