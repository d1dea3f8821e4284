//! Profile operations over the config store, the state file and the live
//! environment.
//!
//! Every operation loads the store fresh from disk and writes it back only
//! when it succeeds, so a failed command never leaves a half-applied change.
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::environment::{Environment, ProcessEnvironment};
use crate::error::{ProfileError, Result};
use crate::shell::apply::{self, ApplyOptions, ApplyReport};
use crate::shell::export;
use crate::state::StateStore;
use crate::vars::{self, Vars};

/// A profile name and whether it is the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileItem {
    /// Profile name.
    pub name: String,
    /// Whether this was the last used or applied profile.
    pub active: bool,
}

/// Live value of a key that appears in at least one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    /// Variable name.
    pub key: String,
    /// `None` when the variable is not set.
    pub value: Option<String>,
}

/// Comparison of one profile variable with the live environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    /// Variable name.
    pub key: String,
    /// Live value; `None` when the variable is not set.
    pub current: Option<String>,
    /// Value stored in the profile.
    pub target: String,
    /// Whether activating the profile would change the environment.
    pub changed: bool,
}

impl DiffRow {
    fn new(key: String, current: Option<String>, target: String) -> Self {
        let changed = match &current {
            None => !target.is_empty(),
            Some(cur) => *cur != target,
        };
        Self {
            key,
            current,
            target,
            changed,
        }
    }

    /// Whether the variable is set in the live environment.
    #[must_use]
    pub const fn has_current(&self) -> bool {
        self.current.is_some()
    }
}

/// Entry point for every profile operation.
///
/// Holds the config path, the (optional) state store and the environment
/// that diffs and status reports read from.
#[derive(Debug)]
pub struct ProfileManager {
    config_path: PathBuf,
    state: Option<StateStore>,
    env: Box<dyn Environment>,
}

impl ProfileManager {
    /// Manager for the store at `config_path`, using the process
    /// environment and the default state file.
    ///
    /// If the state file location cannot be resolved, active-profile
    /// tracking is disabled rather than failing.
    #[must_use]
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        let state = StateStore::locate()
            .map_err(|e| tracing::debug!("active profile tracking disabled: {e}"))
            .ok();
        Self {
            config_path: config_path.into(),
            state,
            env: Box::new(ProcessEnvironment),
        }
    }

    /// Use `store` for active-profile tracking.
    #[must_use]
    pub fn with_state(mut self, store: StateStore) -> Self {
        self.state = Some(store);
        self
    }

    /// Read live variables from `env` instead of the process environment.
    #[must_use]
    pub fn with_environment(mut self, env: impl Environment + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Path of the config file this manager operates on.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn load(&self) -> Result<Config> {
        Ok(Config::load(&self.config_path)?)
    }

    fn save(&self, config: &Config) -> Result<()> {
        Ok(config.save(&self.config_path)?)
    }

    /// Record `name` as active. Failures are logged and otherwise ignored.
    fn mark_active(&self, name: &str) {
        let Some(state) = &self.state else {
            return;
        };
        if let Err(e) = state.set_active_profile(name) {
            tracing::warn!("could not record active profile: {e}");
        }
    }

    fn active_profile(&self) -> Option<String> {
        let state = self.state.as_ref()?;
        match state.load() {
            Ok(s) => s.active().map(str::to_string),
            Err(e) => {
                tracing::debug!("ignoring unreadable state: {e}");
                None
            }
        }
    }

    /// Create an empty profile.
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileError::EmptyName`] or [`ProfileError::AlreadyExists`],
    /// or if the store cannot be loaded or saved.
    pub fn add(&self, name: &str) -> Result<()> {
        let mut config = self.load()?;
        if name.is_empty() {
            return Err(ProfileError::EmptyName.into());
        }
        if config.profiles.contains_key(name) {
            return Err(ProfileError::AlreadyExists(name.to_string()).into());
        }
        config.profiles.insert(name.to_string(), Vars::new());
        self.save(&config)?;
        tracing::debug!("added profile {name}");
        Ok(())
    }

    /// Delete a profile.
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileError::NotFound`], or if the store cannot be loaded
    /// or saved.
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.load()?;
        if config.profiles.remove(name).is_none() {
            return Err(ProfileError::NotFound(name.to_string()).into());
        }
        self.save(&config)?;
        tracing::debug!("removed profile {name}");
        Ok(())
    }

    /// Rename a profile, keeping its variables. The store is written once.
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileError::NotFound`] for `old`,
    /// [`ProfileError::EmptyName`] or [`ProfileError::AlreadyExists`] for
    /// `new`, or if the store cannot be loaded or saved.
    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        let mut config = self.load()?;
        if !config.profiles.contains_key(old) {
            return Err(ProfileError::NotFound(old.to_string()).into());
        }
        if new.is_empty() {
            return Err(ProfileError::EmptyName.into());
        }
        if config.profiles.contains_key(new) {
            return Err(ProfileError::AlreadyExists(new.to_string()).into());
        }
        let vars = config.profiles.remove(old).unwrap_or_default();
        config.profiles.insert(new.to_string(), vars);
        self.save(&config)?;
        tracing::debug!("renamed profile {old} to {new}");
        Ok(())
    }

    /// Variables of profile `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileError::NotFound`], or if the store cannot be loaded.
    pub fn show(&self, name: &str) -> Result<Vars> {
        let config = self.load()?;
        Ok(config.profile(name)?.clone())
    }

    /// Merge `KEY=VALUE` tokens into a profile, overwriting existing keys.
    ///
    /// All tokens are parsed before the store is touched, so one bad token
    /// leaves the profile unchanged.
    ///
    /// # Errors
    ///
    /// Fails with a [`KeyError`](crate::error::KeyError) for a bad token,
    /// [`ProfileError::NotFound`], or a store failure.
    pub fn set_vars<S: AsRef<str>>(&self, name: &str, tokens: &[S]) -> Result<()> {
        let assignments = vars::parse_assignments(tokens)?;
        let mut config = self.load()?;
        config.profile_mut(name)?.extend(assignments);
        self.save(&config)?;
        tracing::debug!("updated {} variable(s) in {name}", tokens.len());
        Ok(())
    }

    /// Remove keys from a profile. Keys that are not present are ignored.
    ///
    /// Keys are normalized and validated before the store is touched.
    ///
    /// # Errors
    ///
    /// Fails with a [`KeyError`](crate::error::KeyError) for the first bad
    /// key, [`ProfileError::NotFound`], or a store failure.
    pub fn unset_vars<S: AsRef<str>>(&self, name: &str, keys: &[S]) -> Result<()> {
        let keys = keys
            .iter()
            .map(|k| {
                let key = vars::normalize_key(k.as_ref());
                vars::validate_key(&key).map(|()| key)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut config = self.load()?;
        let profile = config.profile_mut(name)?;
        for key in &keys {
            profile.remove(key);
        }
        self.save(&config)?;
        tracing::debug!("unset {} variable(s) in {name}", keys.len());
        Ok(())
    }

    /// Export lines for profile `name`, sorted by key.
    ///
    /// Also records the profile as active (best effort).
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileError::NotFound`], an invalid stored key, or if the
    /// store cannot be loaded.
    pub fn use_profile(&self, name: &str) -> Result<Vec<String>> {
        let config = self.load()?;
        let lines = export::export_lines(config.profile(name)?)?;
        self.mark_active(name);
        Ok(lines)
    }

    /// All profile names, sorted, with the active one flagged.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be loaded. State problems are not errors.
    pub fn list(&self) -> Result<Vec<ProfileItem>> {
        let config = self.load()?;
        let active = self.active_profile();
        Ok(config
            .profiles
            .into_keys()
            .map(|name| ProfileItem {
                active: active.as_deref() == Some(name.as_str()),
                name,
            })
            .collect())
    }

    /// Sorted profile names.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be loaded.
    pub fn profile_names(&self) -> Result<Vec<String>> {
        Ok(self.load()?.profiles.into_keys().collect())
    }

    /// Live value of every key mentioned by any profile, sorted by key.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be loaded.
    pub fn status(&self) -> Result<Vec<StatusRow>> {
        let config = self.load()?;
        let keys: BTreeSet<&String> = config.profiles.values().flat_map(Vars::keys).collect();
        Ok(keys
            .into_iter()
            .map(|key| StatusRow {
                key: key.clone(),
                value: self.env.get(key),
            })
            .collect())
    }

    /// Compare profile `name` with the live environment, sorted by key.
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileError::NotFound`], or if the store cannot be loaded.
    pub fn diff(&self, name: &str) -> Result<Vec<DiffRow>> {
        let config = self.load()?;
        Ok(config
            .profile(name)?
            .iter()
            .map(|(key, target)| DiffRow::new(key.clone(), self.env.get(key), target.clone()))
            .collect())
    }

    /// Write profile `name` into the managed block of `rc_path`.
    ///
    /// The profile is marked active even for a dry run.
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileError::NotFound`], or if the rc file cannot be
    /// read, backed up or written.
    pub fn apply_to_rc(
        &self,
        name: &str,
        rc_path: &Path,
        options: ApplyOptions,
    ) -> Result<ApplyReport> {
        let lines = self.use_profile(name)?;
        Ok(apply::apply_to_rc(rc_path, &lines, options)?)
    }
}
