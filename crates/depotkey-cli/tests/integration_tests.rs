#![allow(missing_docs)]

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Test context with an isolated working directory
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn depotkey_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_depotkey");
        let mut cmd = Command::new(bin_path);
        cmd.current_dir(self.temp_dir.path());
        cmd
    }

    fn write_catalog(&self, body: &str) -> PathBuf {
        let path = self.temp_dir.path().join("catalog.toml");
        std::fs::write(&path, body).expect("failed to write catalog");
        path
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx
        .depotkey_cmd()
        .arg("--help")
        .output()
        .expect("failed to run depotkey");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx
        .depotkey_cmd()
        .arg("--version")
        .output()
        .expect("failed to run depotkey");
    assert!(output.status.success());
}

#[test]
fn test_non_numeric_appid_rejected() {
    // Input validation happens before catalog loading or any network
    // activity, so this must fail fast with no server available.
    let ctx = TestContext::new();
    let output = ctx
        .depotkey_cmd()
        .args(["fetch", "not-a-number"])
        .output()
        .expect("failed to run depotkey fetch");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("decimal digits"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_empty_catalog_exhausts_without_network() {
    let ctx = TestContext::new();
    let catalog = ctx.write_catalog("sources = []\n");
    let output = ctx
        .depotkey_cmd()
        .args(["fetch", "730", "--catalog"])
        .arg(&catalog)
        .output()
        .expect("failed to run depotkey fetch");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no cataloged source"),
        "unexpected stderr: {stderr}"
    );
    // Nothing was written.
    assert!(!ctx.temp_dir.path().join("730.lua").exists());
}

#[test]
fn test_malformed_catalog_reported() {
    let ctx = TestContext::new();
    let catalog = ctx.write_catalog("[[sources]]\nrepo = 42\n");
    let output = ctx
        .depotkey_cmd()
        .args(["fetch", "730", "--catalog"])
        .arg(&catalog)
        .output()
        .expect("failed to run depotkey fetch");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("catalog"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_sources_command_lists_catalog() {
    let ctx = TestContext::new();
    let catalog = ctx.write_catalog(
        r#"
[[sources]]
repo = "someone/ManifestHub"
tier = "decrypted"

[[sources]]
repo = "dumps/bruh-hub"
tier = "branch"
"#,
    );
    let output = ctx
        .depotkey_cmd()
        .args(["sources", "--catalog"])
        .arg(&catalog)
        .output()
        .expect("failed to run depotkey sources");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("someone/ManifestHub"));
    assert!(stdout.contains("dumps/bruh-hub"));
    // Tiers appear in priority order.
    let decrypted_at = stdout.find("decrypted").unwrap();
    let branch_at = stdout.find("branch").unwrap();
    assert!(decrypted_at < branch_at);
}

#[test]
fn test_sources_command_uses_builtin_catalog() {
    let ctx = TestContext::new();
    let output = ctx
        .depotkey_cmd()
        .arg("sources")
        .output()
        .expect("failed to run depotkey sources");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ManifestHub/ManifestHub"));
}
