//! Error types for porclr-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from porclr-core
    #[error(transparent)]
    Core(#[from] porclr_core::Error),

    /// Error from porclr-fs
    #[error(transparent)]
    Fs(#[from] porclr_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// A follow-up suggestion for errors the operator can usually fix.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(e) if e.is_authentication() => {
                Some("check the Portainer username and password (-u/-p, PORTAINER_USERNAME, PORTAINER_PASSWORD)")
            }
            Self::Core(e) if e.is_filesystem() => {
                Some("check that the local and compose directories exist and are writable")
            }
            Self::Fs(_) => Some("check the settings file path and its contents"),
            _ => None,
        }
    }
}
