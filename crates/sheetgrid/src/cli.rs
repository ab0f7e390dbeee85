use clap::Parser;
use std::path::PathBuf;

const DEFAULT_DEMO_ROWS: &str = "5000";

#[derive(clap::Parser, Debug, Default)]
#[command(version, about)]
pub struct Args {
    /// Extra configuration file layered over the user config.
    #[clap(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore user config files and environment overrides.
    #[clap(long)]
    pub force_default_config: bool,

    /// Browse generated rows instead of the configured source.
    #[arg(long, value_name = "ROWS", num_args = 0..=1, default_missing_value = DEFAULT_DEMO_ROWS)]
    pub demo: Option<usize>,

    /// Go straight to the dashboard.
    #[clap(long)]
    pub skip_login: bool,

    #[clap(long, value_name = "PATH")]
    /// Write logs here instead of the platform cache directory.
    pub log_file: Option<PathBuf>,

    #[clap(long, value_name = "LEVEL")]
    /// off, error, warn, info, debug or trace.
    pub log_level: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_takes_an_optional_row_count() {
        let args = Args::try_parse_from(["sheetgrid", "--demo"]).unwrap();
        assert_eq!(args.demo, Some(5000));
        let args = Args::try_parse_from(["sheetgrid", "--demo", "250", "--skip-login"]).unwrap();
        assert_eq!(args.demo, Some(250));
        assert!(args.skip_login);
        let args = Args::try_parse_from(["sheetgrid"]).unwrap();
        assert_eq!(args.demo, None);
    }

    #[test]
    fn paths_and_levels() {
        let args = Args::try_parse_from([
            "sheetgrid",
            "--config",
            "/tmp/x.toml",
            "--log-level",
            "debug",
            "--force-default-config",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/x.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.force_default_config);
        assert!(Args::try_parse_from(["sheetgrid", "--demo", "many"]).is_err());
    }
}
