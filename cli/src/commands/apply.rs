//! Command: write a profile into a shell rc file.
use std::io::Write;

use anyhow::{Context as _, Result};

use crate::cli::ApplyOpts;
use crate::error::GpxError;
use crate::logging::Logger;
use crate::profiles::ProfileManager;
use crate::shell::ShellKind;
use crate::shell::apply::ApplyOptions;

/// Apply `opts.profile` to the rc file chosen by `--rc` or `--shell`.
///
/// On a dry run the would-be rc content is printed instead of written.
///
/// # Errors
///
/// Returns an error for an unsupported shell, a missing profile, or any
/// failure reading or writing the rc file.
pub fn run(
    manager: &ProfileManager,
    opts: &ApplyOpts,
    out: &mut dyn Write,
    log: &Logger,
) -> Result<()> {
    let rc_path = match &opts.rc {
        Some(path) => path.clone(),
        None => {
            let shell: ShellKind = opts.shell.parse().map_err(GpxError::from)?;
            shell.default_rc_path()?
        }
    };
    log.stage(&format!("Applying profile {:?} to {}", opts.profile, rc_path.display()));

    let options = ApplyOptions {
        dry_run: opts.dry_run,
        backup: opts.backup,
    };
    let report = manager
        .apply_to_rc(&opts.profile, &rc_path, options)
        .with_context(|| format!("apply {:?} to {}", opts.profile, rc_path.display()))?;

    if !opts.backup {
        log.info("Note: no backup was created (use --backup to enable)");
    }

    if opts.dry_run {
        log.dry_run(&format!("would write GPX block to {}", report.rc_path.display()));
        if !report.would_change {
            log.dry_run("rc file already up to date");
        }
        out.write_all(report.new_content.as_bytes())?;
        return Ok(());
    }

    writeln!(out, "Applied profile {:?} to {}", opts.profile, report.rc_path.display())?;
    if let Some(backup) = &report.backup_path {
        writeln!(out, "Backup: {}", backup.display())?;
    }
    writeln!(out, "Next: source {} (or restart shell)", report.rc_path.display())?;
    Ok(())
}
