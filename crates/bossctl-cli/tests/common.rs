//! Shared helpers for the CLI integration tests.
//!
//! Every command runs against an empty temporary config file so the
//! developer's own `~/.config/bossctl/config.toml` never leaks into a test.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    pub fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).expect("Failed to write config");
    }

    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("bossctl").expect("Failed to find bossctl binary");
        cmd.arg("--config")
            .arg(&self.config_path)
            .env_remove("BOSSCTL_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `bossctl render <kind> --input <fixture> <args...>`
    pub fn render(&self, kind: &str, fixture: &str, args: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.arg("render")
            .arg(kind)
            .arg("--input")
            .arg(fixture_path(fixture))
            .args(args);
        cmd
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run bossctl");
    assert!(
        output.status.success(),
        "bossctl failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}
