//! Command: print export statements for a profile.
use std::io::Write;

use anyhow::Result;

use crate::profiles::ProfileManager;

/// Print `export` lines for `profile` and mark it active.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the profile does not
/// exist.
pub fn run(manager: &ProfileManager, profile: &str, out: &mut dyn Write) -> Result<()> {
    for line in manager.use_profile(profile)? {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
