//! Command: compare a profile with the current environment.
use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use crate::profiles::{DiffRow, ProfileManager};

/// Render one line per key, `*` marking keys that would change.
#[must_use]
pub fn format_diff(rows: &[DiffRow]) -> String {
    if rows.is_empty() {
        return "(no variables in profile)\n".to_string();
    }
    let mut text = String::new();
    for row in rows {
        let flag = if row.changed { '*' } else { ' ' };
        let current = row
            .current
            .as_ref()
            .map_or_else(|| "(not set)".to_string(), |v| format!("{v:?}"));
        writeln!(text, "{flag} {}: {current} -> {:?}", row.key, row.target).ok();
    }
    text.push_str("\nLegend: * = would change\n");
    text
}

/// Print the diff for `profile`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the profile does not
/// exist.
pub fn run(manager: &ProfileManager, profile: &str, out: &mut dyn Write) -> Result<()> {
    let rows = manager.diff(profile)?;
    out.write_all(format_diff(&rows).as_bytes())?;
    Ok(())
}
