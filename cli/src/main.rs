//! `gpx` binary entry point.
use std::process::ExitCode;

use clap::Parser;

use gpx_cli::{cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.command.name();
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = commands::run(&args, &mut out, &log);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_error(&err, &args.global, &log);
            ExitCode::FAILURE
        }
    }
}
