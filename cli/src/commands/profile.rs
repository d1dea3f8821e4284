//! Command: edit profiles in the config file.
use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use crate::cli::ProfileCommand;
use crate::profiles::ProfileManager;
use crate::vars::Vars;

/// Render `name:` followed by `  KEY="value"` lines in key order.
#[must_use]
pub fn format_profile_vars(name: &str, vars: &Vars) -> String {
    let mut text = format!("{name}:\n");
    for (key, value) in vars {
        writeln!(text, "  {key}={value:?}").ok();
    }
    text
}

/// Run a `profile` subcommand.  Mutations print `OK`.
///
/// # Errors
///
/// Returns whatever the underlying profile operation returns.
pub fn run(manager: &ProfileManager, action: &ProfileCommand, out: &mut dyn Write) -> Result<()> {
    match action {
        ProfileCommand::Add { name } => manager.add(name)?,
        ProfileCommand::Rm { name } => manager.remove(name)?,
        ProfileCommand::Rename { old, new } => manager.rename(old, new)?,
        ProfileCommand::Show { name } => {
            let vars = manager.show(name)?;
            out.write_all(format_profile_vars(name, &vars).as_bytes())?;
            return Ok(());
        }
        ProfileCommand::Set { name, assignments } => manager.set_vars(name, assignments)?,
        ProfileCommand::Unset { name, keys } => manager.unset_vars(name, keys)?,
    }
    writeln!(out, "OK")?;
    Ok(())
}
