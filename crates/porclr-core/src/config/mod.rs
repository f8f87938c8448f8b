//! Configuration for porclr
//!
//! Two layers:
//!
//! - [`Settings`]: what the operator wrote down, loaded from a config file
//!   (`<config_dir>/porclr/config.toml` by default). Every field is optional.
//! - [`SyncConfig`]: the explicit, validated configuration handed to the
//!   [`SyncEngine`](crate::SyncEngine).
//!
//! The CLI merges flags and environment variables over the file layer with
//! [`Settings::merge`] and then calls [`Settings::into_sync_config`].
//!
//! # Example file
//!
//! ```toml
//! url = "localhost:9000"
//! username = "admin"
//! local_root = "/srv/compose"
//! portainer_compose_dir = "/var/lib/docker/volumes/portainer_data/_data/compose"
//!
//! [stacks]
//! network-stack = ["duckdns", "pihole-unbound"]
//! home-stack = ["grocy"]
//! ```

mod settings;
mod sync_config;

pub use settings::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, Settings};
pub use sync_config::SyncConfig;
