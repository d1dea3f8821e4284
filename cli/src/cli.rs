//! Command-line argument definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for gpx.
#[derive(Parser, Debug)]
#[command(
    name = "gpx",
    about = "Manage environment presets for Go workflows",
    after_help = "Tip: eval \"$(gpx use public)\"",
    version
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Path to the config file (default: $GPX_CONFIG or ~/.config/gpx/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default config file
    Init(InitOpts),
    /// List profiles, marking the active one
    List,
    /// Show the live value of every key used by any profile
    Status,
    /// Print export statements for a profile
    Use(ProfileArg),
    /// Print export statements for KEY=VALUE assignments
    Set(SetOpts),
    /// Print unset statements for keys
    Unset(UnsetOpts),
    /// Compare a profile with the current environment
    Diff(ProfileArg),
    /// Write a profile into the managed block of a shell rc file
    Apply(ApplyOpts),
    /// Edit profiles in the config file
    Profile {
        /// Profile editing action
        #[command(subcommand)]
        action: ProfileCommand,
    },
    /// Generate a shell completion script
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::List => "list",
            Self::Status => "status",
            Self::Use(_) => "use",
            Self::Set(_) => "set",
            Self::Unset(_) => "unset",
            Self::Diff(_) => "diff",
            Self::Apply(_) => "apply",
            Self::Profile { .. } => "profile",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitOpts {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// A single profile name argument.
#[derive(Parser, Debug, Clone)]
pub struct ProfileArg {
    /// Profile name
    pub profile: String,
}

/// Options for the `set` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SetOpts {
    /// Assignments of the form KEY=VALUE
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

/// Options for the `unset` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UnsetOpts {
    /// Variable names
    #[arg(required = true, value_name = "KEY")]
    pub keys: Vec<String>,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Profile name
    pub profile: String,

    /// Rc file to modify (overrides --shell)
    #[arg(long, value_name = "PATH")]
    pub rc: Option<PathBuf>,

    /// Shell whose rc file to modify when --rc is not given (zsh or bash)
    #[arg(long, default_value = "zsh")]
    pub shell: String,

    /// Show what would be written without modifying any file
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Copy the rc file aside before modifying it
    #[arg(long)]
    pub backup: bool,
}

/// `profile` subcommands.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Create an empty profile
    Add {
        /// Profile name
        name: String,
    },
    /// Delete a profile
    Rm {
        /// Profile name
        name: String,
    },
    /// Rename a profile
    Rename {
        /// Current profile name
        old: String,
        /// New profile name
        new: String,
    },
    /// Print a profile's variables
    Show {
        /// Profile name
        name: String,
    },
    /// Add or overwrite variables in a profile
    Set {
        /// Profile name
        name: String,
        /// Assignments of the form KEY=VALUE
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
    /// Remove variables from a profile
    Unset {
        /// Profile name
        name: String,
        /// Variable names
        #[arg(required = true, value_name = "KEY")]
        keys: Vec<String>,
    },
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
