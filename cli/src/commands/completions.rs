//! Command: generate shell completion scripts.
use std::io::Write;

use anyhow::Result;
use clap::CommandFactory as _;

use crate::cli::Cli;

/// Write the completion script for `shell` to `out`.
///
/// # Errors
///
/// Returns an error if `out` cannot be flushed.
pub fn run(shell: clap_complete::Shell, out: &mut dyn Write) -> Result<()> {
    clap_complete::generate(shell, &mut Cli::command(), "gpx", out);
    out.flush()?;
    Ok(())
}
