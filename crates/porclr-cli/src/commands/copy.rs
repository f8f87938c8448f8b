//! Copy command implementation

use porclr_core::SyncEngine;

use super::{Invocation, print_header, print_report};
use crate::error::Result;

/// Run the copy command
///
/// Writes each stack's compose content, fetched from the API, unless a file
/// is already present.
pub fn run_copy(invocation: Invocation) -> Result<()> {
    let config = invocation.resolve(true)?;
    print_header("Copying Portainer stacks into", &config.local_root);

    let report = SyncEngine::new(config).copy()?;
    print_report(&report);
    Ok(())
}
