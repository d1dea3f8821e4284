//! Profile store: the JSON file holding every named profile.
//!
//! ```json
//! {
//!   "profiles": {
//!     "public": { "GOPROXY": "https://proxy.golang.org,direct" }
//!   }
//! }
//! ```
//!
//! Loading decodes into [`ConfigDocument`], whose nullable fields let
//! [`validation::validate`] tell `null` apart from `{}`, and only then
//! converts to the strongly typed [`Config`].
pub mod paths;
pub mod validation;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, StoreError};
use crate::files;
use crate::vars::Vars;

/// Raw decoded form of the config file, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigDocument {
    /// `None` when the field is `null` or absent.
    #[serde(default)]
    pub profiles: Option<BTreeMap<String, Option<Vars>>>,
}

/// Validated profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Profile name to variable assignments.
    pub profiles: BTreeMap<String, Vars>,
}

impl Default for Config {
    /// The seed written by `gpx init`: a single `public` profile pointing
    /// at the public Go module proxy.
    fn default() -> Self {
        let public = Vars::from([
            (
                "GOPROXY".to_string(),
                "https://proxy.golang.org,direct".to_string(),
            ),
            ("GOPRIVATE".to_string(), String::new()),
            ("GONOSUMDB".to_string(), String::new()),
            ("GOTOOLCHAIN".to_string(), "auto".to_string()),
        ]);
        Self {
            profiles: BTreeMap::from([("public".to_string(), public)]),
        }
    }
}

impl Config {
    /// Read, decode and validate the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file cannot be read (including
    /// when it does not exist), [`StoreError::Parse`] for malformed JSON and
    /// [`StoreError::Validation`] if an invariant is broken.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: ConfigDocument =
            serde_json::from_str(&text).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        validation::validate(&doc).map_err(|source| StoreError::Validation {
            path: path.to_path_buf(),
            source,
        })?;

        let profiles = doc
            .profiles
            .unwrap_or_default()
            .into_iter()
            .map(|(name, vars)| (name, vars.unwrap_or_default()))
            .collect();
        tracing::debug!("loaded config from {}", path.display());
        Ok(Self { profiles })
    }

    /// Write the store to `path` as pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] or [`StoreError::Write`].
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(self).map_err(|source| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        json.push('\n');
        files::atomic_write(path, json.as_bytes())?;
        tracing::debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Variables of profile `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NotFound`] if there is no such profile.
    pub fn profile(&self, name: &str) -> Result<&Vars, ProfileError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }

    /// Mutable variables of profile `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NotFound`] if there is no such profile.
    pub fn profile_mut(&mut self, name: &str) -> Result<&mut Vars, ProfileError> {
        self.profiles
            .get_mut(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }
}

/// Whether [`init`] wrote a new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// The default config was written.
    Created,
    /// A config already existed and was left alone.
    AlreadyExists,
}

impl fmt::Display for InitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::AlreadyExists => write!(f, "already_exists"),
        }
    }
}

/// Result of [`init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Config file that was checked or written.
    pub path: PathBuf,
    /// What happened to it.
    pub status: InitStatus,
}

/// Write the default store to `path`.
///
/// An existing file is left alone unless `force` is set.
///
/// # Errors
///
/// Returns [`StoreError`] if the existence check or the write fails.
pub fn init(path: &Path, force: bool) -> Result<InitReport, StoreError> {
    if !force && files::exists(path)? {
        tracing::debug!("config {} exists, not overwriting", path.display());
        return Ok(InitReport {
            path: path.to_path_buf(),
            status: InitStatus::AlreadyExists,
        });
    }
    Config::default().save(path)?;
    Ok(InitReport {
        path: path.to_path_buf(),
        status: InitStatus::Created,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::validation::ValidationError;

    fn write(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, json).unwrap();
        path
    }

    // -----------------------------------------------------------------------
    // load
    // -----------------------------------------------------------------------

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }), "got {err:?}");
    }

    #[test]
    fn load_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "{\"profiles\": ");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn load_wrong_value_type_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"profiles":{"p":{"A":1}}}"#);
        assert!(matches!(
            Config::load(&path).unwrap_err(),
            StoreError::Parse { .. }
        ));
    }

    #[test]
    fn load_rejects_null_and_absent_profiles() {
        let dir = tempfile::tempdir().unwrap();
        for json in [r#"{"profiles":null}"#, "{}"] {
            let path = write(&dir, json);
            let err = Config::load(&path).unwrap_err();
            assert!(
                matches!(
                    err,
                    StoreError::Validation {
                        source: ValidationError::MissingProfiles,
                        ..
                    }
                ),
                "{json}: got {err:?}"
            );
        }
    }

    #[test]
    fn load_accepts_empty_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"profiles":{}}"#);
        assert!(Config::load(&path).unwrap().profiles.is_empty());
    }

    #[test]
    fn load_null_vars_names_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"profiles":{"corp":null}}"#);
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("\"corp\""), "got: {err}");
    }

    // -----------------------------------------------------------------------
    // save
    // -----------------------------------------------------------------------

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut cfg = Config::default();
        cfg.profiles.insert("empty".to_string(), Vars::new());
        cfg.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), cfg);
    }

    #[test]
    fn save_writes_sorted_pretty_json_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg = Config {
            profiles: BTreeMap::from([(
                "p".to_string(),
                Vars::from([
                    ("B".to_string(), "2".to_string()),
                    ("A".to_string(), "1".to_string()),
                ]),
            )]),
        };
        cfg.save(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"profiles\": {\n    \"p\": {\n      \"A\": \"1\",\n      \"B\": \"2\"\n    }\n  }\n}\n"
        );
    }

    // -----------------------------------------------------------------------
    // Default seed
    // -----------------------------------------------------------------------

    #[test]
    fn default_seed_is_public_profile() {
        let cfg = Config::default();
        assert_eq!(cfg.profiles.len(), 1);
        let public = cfg.profile("public").unwrap();
        assert_eq!(public["GOPROXY"], "https://proxy.golang.org,direct");
        assert_eq!(public["GOPRIVATE"], "");
        assert_eq!(public["GONOSUMDB"], "");
        assert_eq!(public["GOTOOLCHAIN"], "auto");
    }

    #[test]
    fn profile_lookup_not_found() {
        let mut cfg = Config::default();
        assert_eq!(
            cfg.profile("corp").unwrap_err(),
            ProfileError::NotFound("corp".to_string())
        );
        assert!(cfg.profile_mut("corp").is_err());
    }

    // -----------------------------------------------------------------------
    // init
    // -----------------------------------------------------------------------

    #[test]
    fn init_creates_then_reports_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpx").join("config.json");

        let first = init(&path, false).unwrap();
        assert_eq!(first.status, InitStatus::Created);
        assert_eq!(Config::load(&path).unwrap(), Config::default());

        fs::write(&path, r#"{"profiles":{}}"#).unwrap();
        let second = init(&path, false).unwrap();
        assert_eq!(second.status, InitStatus::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"profiles":{}}"#);
    }

    #[test]
    fn init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"profiles":{}}"#);
        let report = init(&path, true).unwrap();
        assert_eq!(report.status, InitStatus::Created);
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn init_status_display() {
        assert_eq!(InitStatus::Created.to_string(), "created");
        assert_eq!(InitStatus::AlreadyExists.to_string(), "already_exists");
    }
}
