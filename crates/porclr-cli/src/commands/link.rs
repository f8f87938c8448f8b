//! Link command implementation

use porclr_core::SyncEngine;

use super::{Invocation, print_header, print_report};
use crate::error::Result;

/// Run the link command
///
/// Hard-links each stack's compose file out of Portainer's data volume.
pub fn run_link(invocation: Invocation) -> Result<()> {
    let config = invocation.resolve(true)?;
    print_header("Linking Portainer stacks into", &config.local_root);

    let report = SyncEngine::new(config).link()?;
    print_report(&report);
    Ok(())
}
