//! Terminal dashboard over a spreadsheet-backed site inventory.

mod app;
mod auth;
mod cli;
mod config;
mod error;
mod logging;
mod source;
mod terminal;
mod ui;

use crate::app::App;
use crate::cli::Args;
use crate::config::AppConfig;
use crate::config::SourceKind;
use crate::error::AppError;
use crate::terminal::TerminalSession;
use log::error;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse_args();
    match start(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("sheetgrid: {e}");
            ExitCode::FAILURE
        }
    }
}

fn start(args: Args) -> Result<(), AppError> {
    let mut config = AppConfig::new(args.force_default_config, args.config.as_deref())?;
    if let Some(rows) = args.demo {
        config.source.kind = SourceKind::Demo;
        config.source.demo_rows = rows;
    }

    let log_path = args
        .log_file
        .clone()
        .or_else(|| {
            (!config.log.file.trim().is_empty()).then(|| PathBuf::from(config.log.file.trim()))
        })
        .unwrap_or_else(AppConfig::default_log_path);
    let level = logging::parse_level(args.log_level.as_deref().unwrap_or(&config.log.level));
    logging::init(&log_path, level)?;
    info!(
        "sheetgrid {} starting, logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_path.display()
    );

    let source = source::from_config(&config.source)?;
    let mut app = App::new(&config, source, args.skip_login);

    let mut session = TerminalSession::enter()?;
    let result = app::run(&mut session, &mut app);
    drop(session);
    result?;
    info!("bye");
    Ok(())
}
