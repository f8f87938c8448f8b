//! Fake Portainer data volume laid out as `<root>/<stackId>/docker-compose.yml`.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory shaped like Portainer's `compose` storage root.
///
/// # Example
///
/// ```rust,no_run
/// use porclr_test_utils::PortainerVolume;
///
/// let volume = PortainerVolume::new();
/// volume.add_compose("1", "services:\n  duckdns:\n    container_name: duckdns\n");
/// assert!(volume.compose_path("1").exists());
/// ```
pub struct PortainerVolume {
    temp_dir: TempDir,
}

impl Default for PortainerVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl PortainerVolume {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the compose storage.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the compose file for `stack_id`, whether or not it exists.
    pub fn compose_path(&self, stack_id: &str) -> PathBuf {
        self.path().join(stack_id).join("docker-compose.yml")
    }

    /// Write a compose file for `stack_id` and return its path.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn add_compose(&self, stack_id: &str, content: &str) -> PathBuf {
        let dir = self.path().join(stack_id);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("add_compose: failed to create {}: {e}", dir.display()));
        let path = dir.join("docker-compose.yml");
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("add_compose: failed to write {}: {e}", path.display()));
        path
    }

    /// Write a compose file declaring a single service with `container_name`.
    pub fn add_service(&self, stack_id: &str, container_name: &str) -> PathBuf {
        let content = format!(
            "services:\n  {container_name}:\n    image: example/{container_name}\n    container_name: {container_name}\n"
        );
        self.add_compose(stack_id, &content)
    }
}
