//! Live environment lookup abstraction.
//!
//! Profile diffs and status reports compare stored values with the variables
//! of the running process.  The [`Environment`] trait lets that comparison be
//! unit-tested against an in-memory map instead of the real process
//! environment.

use std::collections::{BTreeMap, HashMap};

/// Read-only key → value lookup over a set of environment variables.
pub trait Environment: Send + Sync + std::fmt::Debug {
    /// Return the value of `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;
}

/// Production [`Environment`] backed by the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }
}

impl Environment for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        Self::get(self, key).cloned()
    }
}

impl Environment for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        Self::get(self, key).cloned()
    }
}
