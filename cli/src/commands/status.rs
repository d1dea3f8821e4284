//! Command: show the live value of every profile key.
use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use crate::profiles::{ProfileManager, StatusRow};

/// Render `KEY: "value"` or `KEY: (not set)` per row.
#[must_use]
pub fn format_status(rows: &[StatusRow]) -> String {
    if rows.is_empty() {
        return "(no variables found in profiles)\n".to_string();
    }
    let mut text = String::new();
    for row in rows {
        let value = row
            .value
            .as_ref()
            .map_or_else(|| "(not set)".to_string(), |v| format!("{v:?}"));
        writeln!(text, "{}: {value}", row.key).ok();
    }
    text
}

/// Print the status table.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
pub fn run(manager: &ProfileManager, out: &mut dyn Write) -> Result<()> {
    let rows = manager.status()?;
    out.write_all(format_status(&rows).as_bytes())?;
    Ok(())
}
