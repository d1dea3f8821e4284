//! Write a managed block into a shell rc file.
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::files;

use super::block;

/// Options controlling [`apply_to_rc`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Compute the new content but do not touch the filesystem.
    pub dry_run: bool,
    /// Copy the existing rc file aside before replacing it.
    pub backup: bool,
}

/// Outcome of [`apply_to_rc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// The rc file that was (or would be) written.
    pub rc_path: PathBuf,
    /// Where the previous content was copied, if a backup was made.
    pub backup_path: Option<PathBuf>,
    /// Whether the new content differs from the old content.
    pub would_change: bool,
    /// Full rc file content after the upsert.
    pub new_content: String,
}

/// Render `lines` into a managed block and upsert it into `rc_path`.
///
/// A missing rc file is treated as empty.  With `dry_run` nothing is
/// written; otherwise the parent directory is created, a timestamped
/// backup is taken if requested and the file exists, and the new content
/// replaces the file atomically.
///
/// # Errors
///
/// Returns [`StoreError::Read`] if the rc file exists but cannot be read,
/// and [`StoreError::Write`] if the directory, backup or rc file cannot be
/// written.
pub fn apply_to_rc<S: AsRef<str>>(
    rc_path: &Path,
    lines: &[S],
    options: ApplyOptions,
) -> Result<ApplyReport, StoreError> {
    let rendered = block::render_block(lines);
    let old = files::read_optional(rc_path)?.unwrap_or_default();
    let new_content = block::upsert_block(&old, &rendered);

    let mut report = ApplyReport {
        rc_path: rc_path.to_path_buf(),
        backup_path: None,
        would_change: new_content != old,
        new_content,
    };

    if options.dry_run {
        tracing::debug!("dry-run: leaving {} untouched", rc_path.display());
        return Ok(report);
    }

    files::ensure_parent_dir(rc_path)?;

    if options.backup && files::exists(rc_path)? {
        let bak = backup_path(rc_path);
        files::copy_file(rc_path, &bak)?;
        tracing::debug!("backed up {} to {}", rc_path.display(), bak.display());
        report.backup_path = Some(bak);
    }

    files::atomic_write(rc_path, report.new_content.as_bytes())?;
    tracing::debug!(
        "wrote {} ({})",
        rc_path.display(),
        if report.would_change { "changed" } else { "unchanged" }
    );
    Ok(report)
}

/// `<rc>.gpx.<YYYYMMDD-HHMMSS>.bak`, stamped with local time.
fn backup_path(rc_path: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let mut name = rc_path.as_os_str().to_os_string();
    name.push(format!(".gpx.{stamp}.bak"));
    PathBuf::from(name)
}
