//! Command: write the default config file.
use std::io::Write;

use anyhow::Result;

use super::resolve_config_path;
use crate::cli::{GlobalOpts, InitOpts};
use crate::config;
use crate::environment::ProcessEnvironment;
use crate::logging::Logger;

/// Create the config file (or report that it exists) and print
/// `Config: <path> (<status>)`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file cannot be
/// written.
pub fn run(global: &GlobalOpts, opts: &InitOpts, out: &mut dyn Write, log: &Logger) -> Result<()> {
    let path = resolve_config_path(global, &ProcessEnvironment)?;
    if opts.force {
        log.debug("--force: overwriting any existing config");
    }
    let report = config::init(&path, opts.force)?;
    writeln!(out, "Config: {} ({})", report.path.display(), report.status)?;
    Ok(())
}
