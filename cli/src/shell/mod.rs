//! Shell integration: quoting, managed rc blocks and the apply pipeline.
pub mod apply;
pub mod block;
pub mod export;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::paths;
use crate::error::{self, ShellError};

/// Supported interactive shells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShellKind {
    /// Z shell, `~/.zshrc`.
    #[default]
    Zsh,
    /// Bash, `~/.bashrc`.
    Bash,
}

impl ShellKind {
    /// Startup file name, relative to the home directory.
    #[must_use]
    pub const fn rc_file_name(self) -> &'static str {
        match self {
            Self::Zsh => ".zshrc",
            Self::Bash => ".bashrc",
        }
    }

    /// Absolute path of this shell's rc file in the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_rc_path(self) -> error::Result<PathBuf> {
        Ok(paths::home_dir()?.join(self.rc_file_name()))
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zsh => write!(f, "zsh"),
            Self::Bash => write!(f, "bash"),
        }
    }
}

impl FromStr for ShellKind {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zsh" => Ok(Self::Zsh),
            "bash" => Ok(Self::Bash),
            _ => Err(ShellError::Unsupported(s.to_string())),
        }
    }
}
