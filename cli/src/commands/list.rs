//! Command: list profiles.
use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use crate::profiles::{ProfileItem, ProfileManager};

/// Render profile names with `*` marking the active one.
#[must_use]
pub fn format_profiles(items: &[ProfileItem]) -> String {
    if items.is_empty() {
        return "(no profiles)\n".to_string();
    }
    let mut text = String::new();
    for item in items {
        let marker = if item.active { '*' } else { ' ' };
        writeln!(text, "{marker} {}", item.name).ok();
    }
    text.push_str("\nLegend: * = active (last used/applied)\n");
    text
}

/// Print every profile.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
pub fn run(manager: &ProfileManager, out: &mut dyn Write) -> Result<()> {
    let items = manager.list()?;
    out.write_all(format_profiles(&items).as_bytes())?;
    Ok(())
}
