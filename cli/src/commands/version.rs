//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Version stamped by the build script, or the crate version for local
/// builds without git metadata.
pub const VERSION: &str = match option_env!("GPX_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Print `gpx <version>`.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "gpx {VERSION}")?;
    Ok(())
}
