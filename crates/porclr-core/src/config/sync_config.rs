//! Engine configuration

use std::collections::BTreeMap;

use porclr_api::Credentials;
use porclr_fs::NormalizedPath;

use crate::{Error, Result, StackMap};

/// Everything the sync engine needs for one run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Portainer base URL (`link` and `copy`)
    pub base_url: Option<String>,

    /// Portainer credentials (`link` and `copy`)
    pub credentials: Option<Credentials>,

    /// Directory receiving one subdirectory per stack
    pub local_root: NormalizedPath,

    /// Portainer's compose storage root (`link` and `scan`)
    pub compose_dir: Option<NormalizedPath>,

    /// Stack name -> applications (`scan`)
    pub stacks: BTreeMap<String, Vec<String>>,
}

impl SyncConfig {
    pub fn new(local_root: NormalizedPath) -> Self {
        Self {
            base_url: None,
            credentials: None,
            local_root,
            compose_dir: None,
            stacks: BTreeMap::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_compose_dir(mut self, compose_dir: NormalizedPath) -> Self {
        self.compose_dir = Some(compose_dir);
        self
    }

    pub fn with_stacks(mut self, stacks: BTreeMap<String, Vec<String>>) -> Self {
        self.stacks = stacks;
        self
    }

    /// Build the application lookup used by `scan`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousApp`] if an application is listed under
    /// more than one stack.
    pub fn stack_map(&self) -> Result<StackMap> {
        StackMap::from_groups(&self.stacks)
    }

    pub(crate) fn require_base_url(&self) -> Result<&str> {
        self.base_url.as_deref().ok_or_else(|| missing("url"))
    }

    pub(crate) fn require_credentials(&self) -> Result<&Credentials> {
        self.credentials.as_ref().ok_or_else(|| missing("credentials"))
    }

    pub(crate) fn require_compose_dir(&self) -> Result<&NormalizedPath> {
        self.compose_dir
            .as_ref()
            .ok_or_else(|| missing("portainer_compose_dir"))
    }
}

fn missing(name: &str) -> Error {
    Error::MissingSetting {
        name: name.to_string(),
    }
}
