//! Last-used profile, persisted in `~/.config/gpx/state.json`.
//!
//! State is advisory: it only drives the `*` marker in `gpx list`.  It is
//! never validated against the profile store, and callers treat failures to
//! read or write it as non-fatal.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::paths;
use crate::error::StoreError;
use crate::files;

/// Contents of the state file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Name of the last used or applied profile; empty when none.
    #[serde(default)]
    pub active_profile: String,
}

impl State {
    /// The active profile, treating an empty name as none.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        Some(self.active_profile.as_str()).filter(|name| !name.is_empty())
    }
}

/// Reads and writes [`State`] at a fixed location.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default `~/.config/gpx/state.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::HomeDir`] if the home directory is unknown.
    pub fn locate() -> Result<Self, StoreError> {
        Ok(Self::new(paths::default_state_path()?))
    }

    /// Location of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state; a missing file yields the default (empty) state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] or [`StoreError::Parse`].
    pub fn load(&self) -> Result<State, StoreError> {
        let Some(text) = files::read_optional(&self.path)? else {
            return Ok(State::default());
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Persist `state` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] or [`StoreError::Write`].
    pub fn save(&self, state: &State) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(state).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');
        files::atomic_write(&self.path, json.as_bytes())
    }

    /// Record `name` as the active profile (load, modify, save).
    ///
    /// # Errors
    ///
    /// Propagates any [`load`](Self::load) or [`save`](Self::save) failure.
    pub fn set_active_profile(&self, name: &str) -> Result<(), StoreError> {
        let mut state = self.load()?;
        name.clone_into(&mut state.active_profile);
        self.save(&state)
    }
}
