//! Filesystem helpers for porclr
//!
//! Directory creation, create-only artifact writes, hard links and
//! format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{ensure_dir, link_new, read_text, write_new};
pub use path::{NormalizedPath, is_plain_segment};
