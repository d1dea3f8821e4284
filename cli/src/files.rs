//! File-system helpers shared by every persisted artifact.
//!
//! The config store, the state file and shell rc files are all replaced
//! through [`atomic_write`]: content goes to a sibling temporary file which is
//! then renamed over the destination, so a concurrent reader sees either the
//! old or the new file, never a partial one.
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Mode for newly created files on Unix (owner rw, group/other r).
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns [`StoreError::Write`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Read `path` as UTF-8, returning `None` if the file does not exist.
///
/// # Errors
///
/// Returns [`StoreError::Read`] for any failure other than not-found.
pub fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Return `true` if something exists at `path`.
///
/// # Errors
///
/// Returns [`StoreError::Read`] if the metadata lookup fails for a reason
/// other than not-found.
pub fn exists(path: &Path) -> Result<bool, StoreError> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Sibling temporary path used while replacing `path`.
///
/// The process id keeps two concurrent writers from sharing a temp file.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

/// Atomically replace `path` with `content`.
///
/// Creates missing parent directories, writes and syncs a sibling temporary
/// file, then renames it over `path`.  An existing file's permissions are
/// carried over; new files get mode `0644` on Unix.
///
/// # Errors
///
/// Returns [`StoreError::Write`] if the directory, the temporary file or the
/// final rename fails.  The temporary file is removed on failure.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    ensure_parent_dir(path)?;
    let tmp = temp_path_for(path);

    let result = write_temp(&tmp, path, content).and_then(|()| fs::rename(&tmp, path));
    result.map_err(|source| {
        fs::remove_file(&tmp).ok();
        StoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_temp(tmp: &Path, dest: &Path, content: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;
        options.mode(FILE_MODE);
    }
    let mut file = options.open(tmp)?;
    file.write_all(content)?;
    file.sync_all()?;
    drop(file);

    if let Ok(meta) = fs::metadata(dest) {
        fs::set_permissions(tmp, meta.permissions())?;
    }
    Ok(())
}

/// Copy `src` to `dst`, overwriting `dst`.
///
/// # Errors
///
/// Returns [`StoreError::Write`] naming `dst` if the copy fails.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), StoreError> {
    fs::copy(src, dst).map_err(|source| StoreError::Write {
        path: dst.to_path_buf(),
        source,
    })?;
    Ok(())
}
