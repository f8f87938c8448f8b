//! Error types for porclr-core

use std::path::PathBuf;

/// Result type for porclr-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in porclr-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The local mirror root does not exist or is not a directory
    #[error("Local directory {path} does not exist or is not a directory")]
    LocalRootMissing { path: PathBuf },

    /// Portainer's compose storage root does not exist or is not a directory
    #[error("Portainer compose directory {path} does not exist or is not a directory")]
    ComposeDirMissing { path: PathBuf },

    /// A setting required by the requested operation was not provided
    #[error("Missing setting: {name}")]
    MissingSetting { name: String },

    /// A remote name or id cannot be used as a single path segment
    #[error("Refusing to use {kind} {value:?} as a directory name")]
    UnsafePathSegment { kind: String, value: String },

    /// A compose file could not be parsed
    #[error("Failed to parse compose file {path}: {message}")]
    Compose { path: PathBuf, message: String },

    /// The same application is assigned to more than one stack
    #[error("Application {app} is mapped to both {first} and {second}")]
    AmbiguousApp {
        app: String,
        first: String,
        second: String,
    },

    /// Error from porclr-api
    #[error(transparent)]
    Api(#[from] porclr_api::Error),

    /// Error from porclr-fs
    #[error(transparent)]
    Fs(#[from] porclr_fs::Error),
}

impl Error {
    /// Whether the Portainer credentials were rejected.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_authentication())
    }

    /// Whether this is a local filesystem failure.
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            Self::Fs(_) | Self::LocalRootMissing { .. } | Self::ComposeDirMissing { .. }
        )
    }
}
