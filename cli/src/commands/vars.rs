//! Commands: `gpx set` and `gpx unset`, which render statements without
//! touching the config.
use std::io::Write;

use anyhow::Result;

use crate::error::GpxError;
use crate::shell::export;

/// Print `export` lines for `KEY=VALUE` assignments.
///
/// # Errors
///
/// Returns an error for a malformed assignment or invalid key.
pub fn run_set(assignments: &[String], out: &mut dyn Write) -> Result<()> {
    let lines = export::render_assignments(assignments).map_err(GpxError::from)?;
    write_lines(&lines, out)
}

/// Print `unset` lines for keys.
///
/// # Errors
///
/// Returns an error if no keys are given or a key is invalid.
pub fn run_unset(keys: &[String], out: &mut dyn Write) -> Result<()> {
    let lines = export::unset_lines(keys).map_err(GpxError::from)?;
    write_lines(&lines, out)
}

fn write_lines(lines: &[String], out: &mut dyn Write) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
