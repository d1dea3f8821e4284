//! Structural checks applied to a decoded config document before use.
use thiserror::Error;

use super::ConfigDocument;
use crate::error::KeyError;
use crate::vars;

/// A config document that decoded cleanly but breaks a store invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `profiles` is `null` or absent.
    #[error("profiles is missing")]
    MissingProfiles,

    /// A profile is keyed by the empty string.
    #[error("profile name is empty")]
    EmptyProfileName,

    /// A profile maps to `null` instead of an object.
    #[error("profile {0:?} has null vars map")]
    NullVars(String),

    /// A profile contains a key that is not a valid variable name.
    #[error("profile {profile:?}: {source}")]
    InvalidKey {
        /// Profile holding the bad key.
        profile: String,
        /// Why the key was rejected.
        source: KeyError,
    },
}

/// Check `doc` against the store invariants.
///
/// Profiles are visited in name order, so the reported error is
/// deterministic when several profiles are broken.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate(doc: &ConfigDocument) -> Result<(), ValidationError> {
    let Some(profiles) = &doc.profiles else {
        return Err(ValidationError::MissingProfiles);
    };
    for (name, vars) in profiles {
        if name.is_empty() {
            return Err(ValidationError::EmptyProfileName);
        }
        let Some(vars) = vars else {
            return Err(ValidationError::NullVars(name.clone()));
        };
        for key in vars.keys() {
            vars::validate_key(key).map_err(|source| ValidationError::InvalidKey {
                profile: name.clone(),
                source,
            })?;
        }
    }
    Ok(())
}
