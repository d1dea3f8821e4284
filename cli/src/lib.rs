//! Go environment profile manager.
//!
//! `gpx` keeps named sets of Go toolchain variables (`GOPROXY`,
//! `GOPRIVATE`, `GOFLAGS`, ...) in a JSON file and turns them into shell
//! statements, either printed for `eval` or written into a managed block of
//! the user's rc file.
//!
//! The public API is organised into layers:
//!
//! - **[`vars`]** and **[`shell`]**: key validation, quoting and the rc block engine
//! - **[`config`]** and **[`state`]**: the profile store and last-used profile
//! - **[`profiles`]**: profile operations over both stores
//! - **[`commands`]**: subcommand handlers and output formatting
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod files;
pub mod logging;
pub mod profiles;
pub mod shell;
pub mod state;
pub mod vars;
