// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed config and state pair so each
// integration test can drive a `ProfileManager` without touching the real
// home directory or process environment.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gpx_cli::logging::Logger;
use gpx_cli::profiles::ProfileManager;
use gpx_cli::state::StateStore;

/// Config file holding a `public` profile and a `corp` profile.
pub const TWO_PROFILES: &str = r#"{
  "profiles": {
    "corp": {
      "GOPRIVATE": "git.corp.example/*",
      "GOPROXY": "https://goproxy.corp.example"
    },
    "public": {
      "GOPROXY": "https://proxy.golang.org,direct"
    }
  }
}
"#;

/// An isolated config and state directory backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding every file the test touches.
    pub root: tempfile::TempDir,
    env: BTreeMap<String, String>,
}

impl IntegrationTestContext {
    /// Create a new context with no config file.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
            env: BTreeMap::new(),
        }
    }

    /// Create a new context whose config file contains `json`.
    pub fn with_config(json: &str) -> Self {
        let ctx = Self::new();
        std::fs::write(ctx.config_path(), json).expect("write config file");
        ctx
    }

    /// Set a variable in the environment the manager reads from.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Path to the temporary directory.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config.json")
    }

    /// Path of the state file.
    pub fn state_path(&self) -> PathBuf {
        self.root.path().join("state.json")
    }

    /// Path of a shell rc file inside the temporary directory.
    pub fn rc_path(&self) -> PathBuf {
        self.root.path().join(".zshrc")
    }

    /// Manager wired to this context's config, state and environment.
    pub fn manager(&self) -> ProfileManager {
        ProfileManager::new(self.config_path())
            .with_state(StateStore::new(self.state_path()))
            .with_environment(self.env.clone())
    }

    /// Raw config file contents.
    pub fn read_config(&self) -> String {
        std::fs::read_to_string(self.config_path()).expect("read config file")
    }

    /// Active profile recorded in the state file, if any.
    pub fn active_profile(&self) -> Option<String> {
        StateStore::new(self.state_path())
            .load()
            .expect("load state")
            .active()
            .map(str::to_string)
    }
}

/// Logger for handlers that need one; no subscriber is installed, so
/// events are discarded.
pub fn quiet_logger() -> Logger {
    Logger::new("test")
}

/// Run `f` against an in-memory stdout and return what it wrote.
pub fn capture(f: impl FnOnce(&mut dyn std::io::Write) -> anyhow::Result<()>) -> String {
    let mut out = Vec::new();
    f(&mut out).expect("command succeeds");
    String::from_utf8(out).expect("stdout is utf-8")
}
