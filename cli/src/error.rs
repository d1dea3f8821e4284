//! Domain-specific error types for the profile engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return [`GpxError`] (through [`Result`]) while command
//! handlers at the CLI boundary convert it to [`anyhow::Error`] via the
//! standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! GpxError
//! ├── Key(KeyError)          key syntax, KEY=VALUE parsing
//! ├── Profile(ProfileError)  lookups and name conflicts in the store
//! ├── Store(StoreError)      read / parse / validate / write of files
//! └── Shell(ShellError)      shell kind resolution
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, GpxError>;

/// Top-level error type for the profile engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum GpxError {
    /// Key syntax or assignment parsing error.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Profile lookup or naming error.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// File read, parse, validation or write error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Shell resolution error.
    #[error(transparent)]
    Shell(#[from] ShellError),
}

impl GpxError {
    /// Return the missing profile name if this is a not-found error.
    #[must_use]
    pub fn missing_profile(&self) -> Option<&str> {
        match self {
            Self::Profile(ProfileError::NotFound(name)) => Some(name),
            _ => None,
        }
    }
}

/// Errors that arise from environment-variable key handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The key does not match `[A-Z_][A-Z0-9_]*`.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Which rule the key breaks.
        reason: &'static str,
    },

    /// A token is not of the form `KEY=VALUE`.
    #[error("invalid assignment {0:?} (expected KEY=VALUE)")]
    InvalidAssignment(String),

    /// An operation that needs at least one key received none.
    #[error("no keys provided")]
    NoKeysProvided,
}

/// Errors that arise from profile lookups and name conflicts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The named profile does not exist in the store.
    #[error("profile not found: {0}")]
    NotFound(String),

    /// A profile name was empty.
    #[error("profile name is empty")]
    EmptyName,

    /// A profile with this name already exists.
    #[error("profile {0:?} already exists")]
    AlreadyExists(String),
}

/// Errors that arise from reading and writing persisted files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A file could not be read (including not-found).
    #[error("read {}: {source}", path.display())]
    Read {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A file does not contain well-formed JSON of the expected shape.
    #[error("parse {}: {source}", path.display())]
    Parse {
        /// Path to the file that could not be decoded.
        path: PathBuf,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// The decoded config breaks a store invariant.
    #[error("validate config {}: {source}", path.display())]
    Validation {
        /// Path to the invalid config file.
        path: PathBuf,
        /// Which invariant was broken.
        source: ValidationError,
    },

    /// A file or directory could not be written.
    #[error("write {}: {source}", path.display())]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("encode {}: {source}", path.display())]
    Encode {
        /// Destination the encoded value was meant for.
        path: PathBuf,
        /// Underlying encode error.
        source: serde_json::Error,
    },

    /// The user's home directory could not be resolved.
    #[error("cannot determine home directory")]
    HomeDir,
}

/// Errors that arise from shell resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// The requested shell kind is not supported.
    #[error("unsupported shell {0:?} (expected zsh or bash)")]
    Unsupported(String),
}
