//! Shared test utilities for the porclr workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`server`]: [`FakePortainer`], an in-process Portainer API double
//! - [`volume`]: [`PortainerVolume`], a fake Portainer compose directory

pub mod server;
pub mod volume;

pub use server::{FakePortainer, RecordedRequest};
pub use volume::PortainerVolume;
