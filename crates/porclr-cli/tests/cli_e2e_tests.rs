//! CLI end-to-end tests that invoke the compiled `porclr` binary.
//!
//! Each test runs against a fake Portainer server and temporary
//! directories. The environment variables porclr reads are cleared so the
//! caller's shell cannot leak into a run.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use porclr_test_utils::{FakePortainer, PortainerVolume};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const NETWORK_COMPOSE: &str = "services:\n  duckdns:\n    container_name: duckdns\n";
const HOME_COMPOSE: &str = "services:\n  grocy:\n    container_name: grocy\n";

const PORCLR_ENV: &[&str] = &[
    "PORTAINER_URL",
    "PORTAINER_USERNAME",
    "PORTAINER_PASSWORD",
    "PORTAINER_COMPOSE_DIR",
    "LINK_PARENT_DIR",
    "PORCLR_CONFIG",
];

/// A `porclr` command with a clean environment.
fn porclr() -> Command {
    let mut cmd = Command::cargo_bin("porclr").unwrap();
    for var in PORCLR_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// An empty settings file, so the operator's real one is never read.
fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();
    path
}

fn two_stack_server() -> FakePortainer {
    let server = FakePortainer::start();
    server.add_stack(1, "network-stack", NETWORK_COMPOSE);
    server.add_stack(2, "home-stack", HOME_COMPOSE);
    server
}

fn artifact(root: &Path, stack: &str) -> PathBuf {
    root.join(stack).join("docker-compose.yml")
}

fn entries(root: &Path) -> usize {
    fs::read_dir(root).unwrap().count()
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_version_flag() {
    porclr()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("porclr "));
}

#[test]
fn test_help_lists_commands() {
    porclr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("link"))
        .stdout(predicate::str::contains("copy"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_no_command_prints_hint() {
    porclr()
        .assert()
        .success()
        .stdout(predicate::str::contains("porclr --help"));
}

#[test]
fn test_completions_bash() {
    porclr()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("porclr"));
}

// ============================================================================
// copy
// ============================================================================

#[test]
fn test_copy_creates_artifacts() {
    let server = two_stack_server();
    let root = TempDir::new().unwrap();
    let config = empty_config(&root);

    porclr()
        .arg("--config")
        .arg(&config)
        .arg("copy")
        .arg(root.path())
        .args(["--url", &server.host()])
        .args(["-u", FakePortainer::USERNAME, "-p", FakePortainer::PASSWORD])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 2 new Compose files."));

    assert_eq!(
        fs::read_to_string(artifact(root.path(), "network-stack")).unwrap(),
        NETWORK_COMPOSE
    );
    assert_eq!(
        fs::read_to_string(artifact(root.path(), "home-stack")).unwrap(),
        HOME_COMPOSE
    );
}

#[test]
fn test_copy_reads_connection_from_environment() {
    let server = two_stack_server();
    let root = TempDir::new().unwrap();
    let config = empty_config(&root);

    porclr()
        .arg("--config")
        .arg(&config)
        .arg("copy")
        .env("LINK_PARENT_DIR", root.path())
        .env("PORTAINER_URL", server.url())
        .env("PORTAINER_USERNAME", FakePortainer::USERNAME)
        .env("PORTAINER_PASSWORD", FakePortainer::PASSWORD)
        .assert()
        .success();

    assert!(artifact(root.path(), "home-stack").is_file());
}

#[test]
fn test_copy_second_run_reports_nothing_to_update() {
    let server = two_stack_server();
    let root = TempDir::new().unwrap();
    let config = empty_config(&root);

    for expected in ["Created 2 new Compose files.", "Nothing to update."] {
        porclr()
            .arg("--config")
            .arg(&config)
            .arg("copy")
            .arg(root.path())
            .args(["--url", &server.url()])
            .args(["-u", FakePortainer::USERNAME, "-p", FakePortainer::PASSWORD])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }
}

#[test]
fn test_copy_wrong_password_fails_without_changes() {
    let server = two_stack_server();
    let root = TempDir::new().unwrap();
    let config = empty_config(&root);

    porclr()
        .arg("--config")
        .arg(&config)
        .arg("copy")
        .arg(root.path())
        .args(["--url", &server.url()])
        .args(["-u", FakePortainer::USERNAME, "-p", "wrong"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Authentication failed"))
        .stderr(predicate::str::contains("hint"));

    // Only the settings file.
    assert_eq!(entries(root.path()), 1);
}

#[test]
fn test_copy_without_password_and_no_terminal_fails() {
    let server = two_stack_server();
    let root = TempDir::new().unwrap();
    let config = empty_config(&root);

    porclr()
        .arg("--config")
        .arg(&config)
        .arg("copy")
        .arg(root.path())
        .args(["--url", &server.url()])
        .args(["-u", FakePortainer::USERNAME])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PORTAINER_PASSWORD"));

    assert!(server.requests().is_empty());
}

#[test]
fn test_copy_missing_root_fails() {
    let server = two_stack_server();
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);

    porclr()
        .arg("--config")
        .arg(&config)
        .arg("copy")
        .arg(dir.path().join("nope"))
        .args(["--url", &server.url()])
        .args(["-u", FakePortainer::USERNAME, "-p", FakePortainer::PASSWORD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    assert!(server.requests().is_empty());
}

// ============================================================================
// link and scan
// ============================================================================

#[test]
fn test_link_with_compose_dir_flag() {
    let server = two_stack_server();
    let volume = PortainerVolume::new();
    volume.add_compose("1", NETWORK_COMPOSE);
    volume.add_compose("2", HOME_COMPOSE);
    let root = TempDir::new().unwrap();
    let config = empty_config(&root);

    porclr()
        .arg("--config")
        .arg(&config)
        .arg("link")
        .arg(root.path())
        .arg("--compose-dir")
        .arg(volume.path())
        .args(["--url", &server.url()])
        .args(["-u", FakePortainer::USERNAME, "-p", FakePortainer::PASSWORD])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 2 new links to Compose files."));

    assert_eq!(
        fs::read_to_string(artifact(root.path(), "network-stack")).unwrap(),
        NETWORK_COMPOSE
    );
}

#[test]
fn test_scan_uses_stack_table_from_config() {
    let volume = PortainerVolume::new();
    volume.add_service("3", "grocy");
    volume.add_service("4", "heimdall");
    let root = TempDir::new().unwrap();
    let config = root.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "portainer_compose_dir = {:?}\n\n[stacks]\nhome-stack = [\"grocy\"]\n",
            volume.path().display().to_string()
        ),
    )
    .unwrap();

    porclr()
        .arg("--config")
        .arg(&config)
        .arg("scan")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no stack configured for heimdall"))
        .stdout(predicate::str::contains("Created 1 new link to Compose file."));

    assert!(artifact(root.path(), "home-stack").is_file());
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_show_json() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "url = \"localhost:9000\"\nusername = \"admin\"\n").unwrap();

    porclr()
        .arg("--config")
        .arg(&config)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"url\": \"localhost:9000\""));
}

#[test]
fn test_config_with_password_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "password = \"hunter2\"\n").unwrap();

    porclr()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .failure()
        .code(1);
}
