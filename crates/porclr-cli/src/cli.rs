//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// porclr - Mirror Portainer stacks' Compose files into a local directory
#[derive(Parser, Debug)]
#[command(name = "porclr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to <config dir>/porclr/config.toml)
    #[arg(short, long, global = true, env = "PORCLR_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Hard-link each stack's Compose file from Portainer's data volume
    ///
    /// Stacks are listed through the API; the files themselves are linked
    /// from <compose-dir>/<stack id>/docker-compose.yml, so this must run on
    /// the Portainer host with access to its volume.
    ///
    /// Examples:
    ///   porclr link ~/stacks --compose-dir /var/lib/docker/volumes/portainer_data/_data/compose
    ///   porclr link -u admin --url localhost:9000
    Link {
        /// Directory receiving one subdirectory per stack
        #[arg(env = "LINK_PARENT_DIR")]
        path: Option<PathBuf>,

        /// Portainer's compose storage directory
        #[arg(long, env = "PORTAINER_COMPOSE_DIR")]
        compose_dir: Option<PathBuf>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Write each stack's Compose file content fetched from the API
    ///
    /// Examples:
    ///   porclr copy ~/stacks --url portainer.lan:9000 -u admin
    Copy {
        /// Directory receiving one subdirectory per stack
        #[arg(env = "LINK_PARENT_DIR")]
        path: Option<PathBuf>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Link Compose files from Portainer's volume without the API
    ///
    /// Each compose file is assigned to a stack by its first container_name,
    /// looked up in the [stacks] table of the settings file.
    Scan {
        /// Directory receiving one subdirectory per stack
        #[arg(env = "LINK_PARENT_DIR")]
        path: Option<PathBuf>,

        /// Portainer's compose storage directory
        #[arg(long, env = "PORTAINER_COMPOSE_DIR")]
        compose_dir: Option<PathBuf>,
    },

    /// Manage porclr settings
    Config {
        /// Config action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   porclr completions bash > ~/.local/share/bash-completion/completions/porclr
    ///   porclr completions zsh > ~/.zfunc/_porclr
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Portainer connection options
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    /// Portainer URL, e.g. localhost:9000 or https://portainer.lan
    #[arg(long, env = "PORTAINER_URL")]
    pub url: Option<String>,

    /// Portainer username (prompted if missing)
    #[arg(short, long, env = "PORTAINER_USERNAME")]
    pub username: Option<String>,

    /// Portainer password (prompted if missing)
    #[arg(short, long, env = "PORTAINER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Config actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Display the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default settings file location
    Path,
}
