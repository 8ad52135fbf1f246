//! Shared testing utilities for vhost CLI and library tests.

use assert_cmd::Command;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated `$HOME` holding a config that points the nginx backend at
/// directories inside the temp dir.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    original_home: Option<OsString>,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        Self::with_driver("nginx")
    }

    pub fn with_driver(driver: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let original_home = env::var_os("HOME");

        let ctx = Self { root, original_home };
        ctx.write_config(&format!(
            "driver: {driver}\npaths:\n  available: {}\n  enabled: {}\n",
            ctx.available_dir().display(),
            ctx.enabled_dir().display()
        ));

        unsafe {
            env::set_var("HOME", ctx.home());
            env::remove_var("VHOST_CONFIG");
        }

        ctx
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.home().join(".config/vhost/config.yaml")
    }

    pub fn write_config(&self, content: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create config directory");
        fs::write(path, content).expect("Failed to write config");
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config")
    }

    pub fn available_dir(&self) -> PathBuf {
        self.home().join("sites-available")
    }

    pub fn enabled_dir(&self) -> PathBuf {
        self.home().join("sites-enabled")
    }

    /// Document root for `domain` inside the temp dir.
    pub fn web_root(&self, domain: &str) -> PathBuf {
        self.home().join("www").join(domain)
    }

    /// Build a command for invoking the compiled `vhost` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("vhost").expect("Failed to locate vhost binary");
        cmd.current_dir(self.home())
            .env("HOME", self.home())
            .env_remove("VHOST_CONFIG")
            .env_remove("VHOST_LOG");
        cmd
    }

    /// `vhost add <domain> --root <web_root>` without touching a real server.
    pub fn add_static(&self, domain: &str) {
        self.cli()
            .args(["add", domain, "--root"])
            .arg(self.web_root(domain))
            .args(["--skip-test", "--no-reload"])
            .assert()
            .success();
    }

    pub fn assert_config_exists(&self, domain: &str) {
        let path = self.available_dir().join(domain);
        assert!(path.is_file(), "config should exist at {}", path.display());
    }

    pub fn assert_enabled(&self, domain: &str) {
        let link = self.enabled_dir().join(domain);
        assert!(link.is_symlink(), "{} should be a symlink", link.display());
    }

    pub fn assert_disabled(&self, domain: &str) {
        let link = self.enabled_dir().join(domain);
        assert!(fs::symlink_metadata(&link).is_err(), "{} should not exist", link.display());
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        match &self.original_home {
            Some(value) => unsafe {
                env::set_var("HOME", value);
            },
            None => unsafe {
                env::remove_var("HOME");
            },
        }
    }
}
