//! Sync engine and configuration for porclr
//!
//! Mirrors Portainer stacks into a local directory tree, one
//! `<root>/<stack>/docker-compose.yml` per stack:
//!
//! - **link**: hard-link each stack's file from Portainer's data volume
//! - **copy**: write the file content fetched from the API
//! - **scan**: walk the data volume without the API, grouping compose files
//!   into stacks through a configured [`StackMap`]
//!
//! ```text
//!            porclr-cli
//!                |
//!           porclr-core
//!             /     \
//!      porclr-api  porclr-fs
//! ```
//!
//! Existing artifacts are never replaced; their presence is what marks a
//! stack as synchronized.

pub mod compose;
pub mod config;
pub mod error;
pub mod stack_map;
pub mod sync;

pub use config::{Settings, SyncConfig};
pub use error::{Error, Result};
pub use stack_map::StackMap;
pub use sync::{COMPOSE_FILE_NAME, Outcome, StackOutcome, Strategy, SyncEngine, SyncReport};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_local_root_missing_displays_path() {
        let error = Error::LocalRootMissing {
            path: PathBuf::from("/srv/compose"),
        };

        let display = format!("{}", error);
        assert!(display.contains("/srv/compose"), "got: {}", display);
    }

    #[test]
    fn error_classification() {
        let auth = Error::Api(porclr_api::Error::Authentication {
            message: "bad".into(),
        });
        assert!(auth.is_authentication());
        assert!(!auth.is_filesystem());

        let fs = Error::Fs(porclr_fs::Error::io(
            "/x",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        ));
        assert!(fs.is_filesystem());
        assert!(!fs.is_authentication());
    }
}
