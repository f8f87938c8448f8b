//! SyncEngine implementation
//!
//! Each strategy runs the same loop: for every stack, ensure
//! `<local_root>/<stack>` exists, then create `docker-compose.yml` inside it
//! unless something is already there. The first hard failure aborts the run;
//! artifacts created before it are kept.

use std::fs;

use porclr_api::{PortainerClient, Stack, StackSource};
use porclr_fs::{NormalizedPath, io, is_plain_segment};

use super::report::{Outcome, StackOutcome, Strategy, SyncReport};
use crate::compose;
use crate::config::SyncConfig;
use crate::{Error, Result};

/// File name of every artifact, and of Portainer's own per-stack file.
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// Key read from compose files by `scan`.
const APP_KEY: &str = "container_name";

/// Materializes Portainer stacks under a local root.
pub struct SyncEngine {
    config: SyncConfig,
}

impl SyncEngine {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Hard-link every stack's compose file out of Portainer's volume.
    ///
    /// Authenticates, lists stacks, then links
    /// `<compose_dir>/<id>/docker-compose.yml` to
    /// `<local_root>/<name>/docker-compose.yml` for each stack lacking one.
    ///
    /// # Errors
    ///
    /// Fails before any network call if the local root or compose directory
    /// is missing, and before any filesystem change if authentication fails.
    pub fn link(&self) -> Result<SyncReport> {
        let compose_dir = self.config.require_compose_dir()?;
        self.check_local_root()?;
        check_dir(compose_dir, |path| Error::ComposeDirMissing { path })?;

        let client = PortainerClient::new(self.config.require_base_url()?)?;
        let session = client.login(self.config.require_credentials()?)?;
        self.link_from(&session, compose_dir)
    }

    /// Write every stack's compose content, fetched from the API.
    ///
    /// # Errors
    ///
    /// Fails before any network call if the local root is missing, and
    /// before any filesystem change if authentication fails.
    pub fn copy(&self) -> Result<SyncReport> {
        self.check_local_root()?;

        let client = PortainerClient::new(self.config.require_base_url()?)?;
        let session = client.login(self.config.require_credentials()?)?;
        self.copy_from(&session)
    }

    /// Link stacks listed by `source` from `compose_dir`.
    pub fn link_from<S: StackSource + ?Sized>(
        &self,
        source: &S,
        compose_dir: &NormalizedPath,
    ) -> Result<SyncReport> {
        let stacks = source.list_stacks()?;
        let mut report = SyncReport::new(Strategy::Link);

        for stack in &stacks {
            let origin = compose_dir
                .join(checked_segment("stack id", stack.id.as_str())?)
                .join(COMPOSE_FILE_NAME);

            let entry = self.materialize(&stack.name, |artifact| {
                let created = io::link_new(&origin, artifact)?;
                if created {
                    tracing::info!(stack = %stack.name, source = %origin, "linked compose file");
                }
                Ok(created)
            })?;
            report.push(entry);
        }

        Ok(report)
    }

    /// Copy stacks listed by `source`, fetching content only for stacks
    /// that have no artifact yet.
    pub fn copy_from<S: StackSource + ?Sized>(&self, source: &S) -> Result<SyncReport> {
        let stacks = source.list_stacks()?;
        let mut report = SyncReport::new(Strategy::Copy);

        for Stack { id, name } in &stacks {
            let entry = self.materialize(name, |artifact| {
                let content = source.fetch_compose_file(id)?;
                let created = io::write_new(artifact, content.as_bytes())?;
                if created {
                    tracing::info!(stack = %name, bytes = content.len(), "copied compose file");
                }
                Ok(created)
            })?;
            report.push(entry);
        }

        Ok(report)
    }

    /// Link compose files found in Portainer's volume, without the API.
    ///
    /// Every subdirectory of the compose directory is visited in name order.
    /// The first `container_name` in its compose file is looked up in the
    /// configured [`StackMap`](crate::StackMap); files whose application has
    /// no stack are reported as [`Outcome::Unmapped`]. When several files map
    /// to one stack, the first one wins and the rest are skipped.
    pub fn scan(&self) -> Result<SyncReport> {
        let compose_dir = self.config.require_compose_dir()?;
        self.check_local_root()?;
        check_dir(compose_dir, |path| Error::ComposeDirMissing { path })?;
        let stack_map = self.config.stack_map()?;

        let mut report = SyncReport::new(Strategy::Scan);

        for subdir in sorted_subdirectories(compose_dir)? {
            let origin = compose_dir.join(&subdir).join(COMPOSE_FILE_NAME);

            if !origin.is_file() {
                tracing::warn!(path = %origin, "no compose file");
                report.push(unmapped(subdir, origin, "no compose file".to_string()));
                continue;
            }

            let app = match compose::attribute_value(&origin, APP_KEY)? {
                Some(app) => app,
                None => {
                    tracing::warn!(path = %origin, "compose file declares no {}", APP_KEY);
                    report.push(unmapped(subdir, origin, format!("no {} found", APP_KEY)));
                    continue;
                }
            };

            let Some(stack) = stack_map.stack_for(&app) else {
                tracing::warn!(app = %app, path = %origin, "application is not assigned to a stack");
                report.push(unmapped(subdir, origin, format!("no stack configured for {}", app)));
                continue;
            };

            let entry = self.materialize(stack, |artifact| {
                let created = io::link_new(&origin, artifact)?;
                if created {
                    tracing::info!(stack = %stack, app = %app, source = %origin, "linked compose file");
                }
                Ok(created)
            })?;
            report.push(entry);
        }

        Ok(report)
    }

    /// Ensure the stack directory, then run `create` if no artifact exists.
    fn materialize<F>(&self, stack: &str, create: F) -> Result<StackOutcome>
    where
        F: FnOnce(&NormalizedPath) -> Result<bool>,
    {
        let stack_dir = self
            .config
            .local_root
            .join(checked_segment("stack name", stack)?);
        let dir_created = io::ensure_dir(&stack_dir)?;
        let artifact = stack_dir.join(COMPOSE_FILE_NAME);

        tracing::debug!(stack = %stack, dir_created, artifact = %artifact, "checking artifact");

        let outcome = if artifact.exists() || !create(&artifact)? {
            tracing::debug!(artifact = %artifact, "already exists");
            Outcome::Skipped
        } else {
            Outcome::Created
        };

        Ok(StackOutcome {
            stack: stack.to_string(),
            path: artifact,
            dir_created,
            outcome,
        })
    }

    fn check_local_root(&self) -> Result<()> {
        check_dir(&self.config.local_root, |path| Error::LocalRootMissing { path })
    }
}

fn check_dir(
    path: &NormalizedPath,
    missing: impl FnOnce(std::path::PathBuf) -> Error,
) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(missing(path.to_native()))
    }
}

fn checked_segment<'a>(kind: &str, value: &'a str) -> Result<&'a str> {
    if is_plain_segment(value) {
        Ok(value)
    } else {
        Err(Error::UnsafePathSegment {
            kind: kind.to_string(),
            value: value.to_string(),
        })
    }
}

fn sorted_subdirectories(dir: &NormalizedPath) -> Result<Vec<String>> {
    let native = dir.to_native();
    let entries = fs::read_dir(&native).map_err(|e| porclr_fs::Error::io(&native, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| porclr_fs::Error::io(&native, e))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn unmapped(subdir: String, origin: NormalizedPath, reason: String) -> StackOutcome {
    StackOutcome {
        stack: subdir,
        path: origin,
        dir_created: false,
        outcome: Outcome::Unmapped { reason },
    }
}
