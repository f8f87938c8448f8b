//! Portainer REST API client for porclr
//!
//! Wraps the three calls the sync engine needs:
//!
//! - `POST /api/auth` to exchange credentials for a JWT
//! - `GET /api/stacks` to enumerate stacks
//! - `GET /api/stacks/{id}/file` to fetch one stack's Compose content
//!
//! The [`StackSource`] trait is the seam the sync engine depends on; an
//! authenticated [`Session`] implements it over HTTP.

pub mod client;
pub mod error;
pub mod source;
pub mod types;

pub use client::{PortainerClient, normalize_base_url};
pub use error::{Error, Result};
pub use source::{Session, StackSource};
pub use types::{AuthToken, Credentials, Stack, StackId};
