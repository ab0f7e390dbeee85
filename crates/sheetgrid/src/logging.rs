//! File logging. The terminal belongs to the UI, so log records never go to stdout/stderr.

use crate::error::AppError;
use log::LevelFilter;
use simplelog::ConfigBuilder;
use simplelog::WriteLogger;
use std::fs::File;
use std::path::Path;

/// Parses a level name, falling back to `Info` for anything unrecognized.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

pub fn init(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|source| AppError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Debug)
        .add_filter_allow_str("sheetgrid")
        .build();
    WriteLogger::init(level, config, file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" TRACE "), LevelFilter::Trace);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
