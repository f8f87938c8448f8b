//! Stack synchronization
//!
//! - **engine**: the [`SyncEngine`] and its link, copy and scan strategies
//! - **report**: per-stack outcomes and the run summary

mod engine;
mod report;

pub use engine::{COMPOSE_FILE_NAME, SyncEngine};
pub use report::{Outcome, StackOutcome, Strategy, SyncReport};
