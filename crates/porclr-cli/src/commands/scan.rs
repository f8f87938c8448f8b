//! Scan command implementation

use colored::Colorize;
use porclr_core::SyncEngine;

use super::{Invocation, print_header, print_report};
use crate::error::Result;

/// Run the scan command
///
/// Links compose files from Portainer's volume, grouped by the `[stacks]`
/// table of the settings file. No network access.
pub fn run_scan(invocation: Invocation) -> Result<()> {
    let config = invocation.resolve(false)?;
    print_header("Scanning Portainer volume for", &config.local_root);

    if config.stacks.is_empty() {
        println!(
            "   {} no [stacks] table configured, every compose file will be unmapped",
            "!".yellow()
        );
    }

    let report = SyncEngine::new(config).scan()?;
    print_report(&report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use porclr_test_utils::PortainerVolume;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_links_mapped_compose_files() {
        let volume = PortainerVolume::new();
        volume.add_service("7", "grocy");
        let root = TempDir::new().unwrap();
        let config = root.path().join("config.toml");
        fs::write(&config, "[stacks]\nhome-stack = [\"grocy\"]\n").unwrap();

        run_scan(Invocation {
            config: Some(config),
            path: Some(root.path().to_path_buf()),
            compose_dir: Some(volume.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

        assert!(root.path().join("home-stack/docker-compose.yml").is_file());
    }
}
