//! Subcommand handlers.
//!
//! Handlers write their results to `out` (stdout in production) and all
//! diagnostics through the [`Logger`], which prints to stderr.  This keeps
//! `eval "$(gpx use corp)"` safe: only shell statements reach stdout.
pub mod apply;
pub mod completions;
pub mod diff;
pub mod init;
pub mod list;
pub mod profile;
pub mod status;
pub mod use_profile;
pub mod vars;
pub mod version;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::paths;
use crate::environment::{Environment, ProcessEnvironment};
use crate::error::GpxError;
use crate::logging::Logger;
use crate::profiles::ProfileManager;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "GPX_CONFIG";

/// Resolve the config file: `--config`, then `$GPX_CONFIG`, then
/// `~/.config/gpx/config.json`.
///
/// # Errors
///
/// Returns an error if the default is needed and the home directory cannot
/// be determined.
pub fn resolve_config_path(global: &GlobalOpts, env: &dyn Environment) -> Result<PathBuf> {
    if let Some(ref path) = global.config {
        return Ok(path.clone());
    }
    if let Some(path) = env.get(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(paths::default_config_path()?)
}

/// Build a [`ProfileManager`] for the resolved config path.
///
/// # Errors
///
/// See [`resolve_config_path`].
pub fn manager(global: &GlobalOpts, log: &Logger) -> Result<ProfileManager> {
    let path = resolve_config_path(global, &ProcessEnvironment)?;
    log.debug(&format!("config: {}", path.display()));
    Ok(ProfileManager::new(path))
}

/// Dispatch a parsed command line to its handler, then flush `out`.
///
/// # Errors
///
/// Returns whatever the handler returns, or the flush error: output that
/// never reached stdout counts as a failed run.
pub fn run(cli: &Cli, out: &mut dyn Write, log: &Logger) -> Result<()> {
    dispatch(cli, out, log)?;
    out.flush()?;
    Ok(())
}

fn dispatch(cli: &Cli, out: &mut dyn Write, log: &Logger) -> Result<()> {
    let global = &cli.global;
    match &cli.command {
        Command::Init(opts) => init::run(global, opts, out, log),
        Command::List => list::run(&manager(global, log)?, out),
        Command::Status => status::run(&manager(global, log)?, out),
        Command::Use(arg) => use_profile::run(&manager(global, log)?, &arg.profile, out),
        Command::Set(opts) => vars::run_set(&opts.assignments, out),
        Command::Unset(opts) => vars::run_unset(&opts.keys, out),
        Command::Diff(arg) => diff::run(&manager(global, log)?, &arg.profile, out),
        Command::Apply(opts) => apply::run(&manager(global, log)?, opts, out, log),
        Command::Profile { action } => profile::run(&manager(global, log)?, action, out),
        Command::Completions(opts) => completions::run(opts.shell, out),
        Command::Version => version::run(out),
    }
}

/// Log a failed command.
///
/// Prints the error chain on one line.  When the failure is a missing
/// profile, also lists the profiles that do exist.
pub fn report_error(err: &anyhow::Error, global: &GlobalOpts, log: &Logger) {
    log.error(&format!("{err:#}"));

    if err
        .downcast_ref::<GpxError>()
        .and_then(GpxError::missing_profile)
        .is_some()
    {
        let available = resolve_config_path(global, &ProcessEnvironment)
            .ok()
            .and_then(|path| ProfileManager::new(path).profile_names().ok());
        match available {
            Some(names) if !names.is_empty() => {
                log.info(&format!("available profiles: {}", names.join(", ")));
            }
            Some(_) => log.info("no profiles defined; add one with `gpx profile add <name>`"),
            None => {}
        }
    }

    log.hint_log_file();
}
