//! File-backed settings layer

use std::collections::BTreeMap;
use std::path::PathBuf;

use porclr_api::Credentials;
use porclr_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use super::SyncConfig;
use crate::{Error, Result};

/// Directory under the platform config dir holding porclr's settings.
pub const CONFIG_DIR_NAME: &str = "porclr";

/// Default settings file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Operator settings, every field optional.
///
/// There is no password field: it comes from a flag, the
/// environment or a prompt, never from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Portainer base URL, with or without scheme
    pub url: Option<String>,

    /// Portainer username
    pub username: Option<String>,

    /// Directory holding one subdirectory per stack
    pub local_root: Option<PathBuf>,

    /// Portainer's `compose` storage directory inside its data volume
    pub portainer_compose_dir: Option<PathBuf>,

    /// Stack name -> applications, used by `scan`
    pub stacks: BTreeMap<String, Vec<String>>,
}

impl Settings {
    /// Platform default location, e.g. `~/.config/porclr/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings from `path`; the format follows the extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let settings = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, "loaded settings");
        Ok(settings)
    }

    /// Load from the default location, or return empty settings if there is
    /// no file there.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&NormalizedPath::new(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Overlay `overrides` on top of `self`.
    ///
    /// Scalar fields set in `overrides` win; stack groups are merged with
    /// `overrides` replacing whole groups of the same name.
    pub fn merge(mut self, overrides: Settings) -> Settings {
        self.url = overrides.url.or(self.url);
        self.username = overrides.username.or(self.username);
        self.local_root = overrides.local_root.or(self.local_root);
        self.portainer_compose_dir = overrides
            .portainer_compose_dir
            .or(self.portainer_compose_dir);
        self.stacks.extend(overrides.stacks);
        self
    }

    /// Turn settings into an engine configuration.
    ///
    /// `password` completes the credentials when a username is known; the
    /// URL and credentials stay optional since `scan` needs neither.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetting`] if `local_root` is unset. Stack
    /// groups are only checked when `scan` builds its lookup table.
    pub fn into_sync_config(self, password: Option<String>) -> Result<SyncConfig> {
        let local_root = self.local_root.ok_or_else(|| Error::MissingSetting {
            name: "local_root".to_string(),
        })?;

        let mut config = SyncConfig::new(NormalizedPath::new(local_root))
            .with_stacks(self.stacks);

        if let Some(url) = self.url {
            config = config.with_base_url(url);
        }
        if let (Some(username), Some(password)) = (self.username, password) {
            config = config.with_credentials(Credentials::new(username, password));
        }
        if let Some(dir) = self.portainer_compose_dir {
            config = config.with_compose_dir(NormalizedPath::new(dir));
        }

        Ok(config)
    }
}
