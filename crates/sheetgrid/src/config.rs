//! Layered application configuration.
//!
//! Sources, later ones overriding earlier ones: the embedded `default_config.toml`, the user's
//! `config.toml` in the platform config directory, an explicit `--config` file, and finally
//! `SHEETGRID_*` environment variables (`__` separates nested keys, e.g.
//! `SHEETGRID_SOURCE__API_KEY`).

use crate::error::AppError;
use config::Config;
use config::Environment;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use log::warn;
use serde::Deserialize;
use sheetgrid_core::classify::ColumnKinds;
use sheetgrid_core::debounce::SEARCH_DEBOUNCE_MAX;
use sheetgrid_core::debounce::SEARCH_DEBOUNCE_MIN;
use sheetgrid_core::layout::ColumnWidth;
use sheetgrid_core::layout::ConfiguredWidths;
use sheetgrid_core::layout::WidthStrategy;
use sheetgrid_core::table::TableViewOptions;
use sheetgrid_core::window::RowWindowOptions;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

const DEFAULT_CONFIG: &str = include_str!("../default_config.toml");
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "SHEETGRID";

pub static PROJECT_DIR: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("dev", "sheetgrid", "sheetgrid"));

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub source: SourceConfig,
    pub table: TableConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Demo,
    Sheets,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub demo_rows: usize,
    pub demo_latency_ms: u64,
    pub base_url: String,
    pub spreadsheet_id: String,
    pub sheet: String,
    pub last_column: String,
    pub chunk_rows: usize,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthStrategyName {
    Content,
    Configured,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct WidthEntry {
    pub regular: u32,
    pub compact: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TableConfig {
    pub search_debounce_ms: u64,
    pub compact_breakpoint_px: u32,
    pub overscan: usize,
    pub row_height_regular: u32,
    pub row_height_compact: u32,
    pub key_column: usize,
    pub width_strategy: WidthStrategyName,
    pub numeric_columns: Vec<String>,
    #[serde(default)]
    pub widths: HashMap<String, WidthEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub file: String,
}

impl AppConfig {
    /// Loads every layer. `extra` is an explicit file that must exist.
    pub fn new(force_default_config: bool, extra: Option<&Path>) -> Result<Self, AppError> {
        let mut config =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if !force_default_config {
            if let Some(proj_dirs) = &*PROJECT_DIR {
                let config_file = proj_dirs.config_dir().join(CONFIG_FILE);
                config = config.add_source(File::from(config_file).required(false));
            }
            if let Some(path) = extra {
                if !path.exists() {
                    return Err(AppError::MissingConfigFile(path.to_path_buf()));
                }
                config = config.add_source(File::from(path.to_path_buf()));
            }
            config = config.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("table.numeric_columns"),
            );
        }

        Ok(config.build()?.try_deserialize()?)
    }

    /// Default configuration with `overrides` layered on top.
    #[cfg(test)]
    pub fn new_from_toml(overrides: &str) -> Result<Self, AppError> {
        Ok(Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    pub fn default_log_path() -> PathBuf {
        match &*PROJECT_DIR {
            Some(dirs) => dirs.cache_dir().join("sheetgrid.log"),
            None => PathBuf::from("sheetgrid.log"),
        }
    }
}

impl TableConfig {
    /// Search quiet window, held to 300..=500 ms whatever the config says.
    pub fn search_debounce(&self) -> Duration {
        let requested = Duration::from_millis(self.search_debounce_ms);
        let delay = requested.clamp(SEARCH_DEBOUNCE_MIN, SEARCH_DEBOUNCE_MAX);
        if delay != requested {
            warn!(
                "search_debounce_ms = {} is out of range, using {}",
                self.search_debounce_ms,
                delay.as_millis()
            );
        }
        delay
    }

    pub fn width_strategy(&self) -> WidthStrategy {
        match self.width_strategy {
            WidthStrategyName::Content => WidthStrategy::ContentDerived,
            WidthStrategyName::Configured => {
                let mut widths = ConfiguredWidths::default();
                for (name, entry) in &self.widths {
                    widths.by_name.insert(
                        name.clone(),
                        ColumnWidth {
                            regular: entry.regular,
                            compact: entry.compact,
                        },
                    );
                }
                WidthStrategy::Configured(widths)
            }
        }
    }

    pub fn view_options(&self) -> TableViewOptions {
        TableViewOptions {
            window: RowWindowOptions {
                overscan: self.overscan,
                row_height_regular: self.row_height_regular,
                row_height_compact: self.row_height_compact,
            },
            compact_breakpoint_px: self.compact_breakpoint_px,
            key_column: self.key_column,
            search_debounce: self.search_debounce(),
            width_strategy: self.width_strategy(),
            column_kinds: ColumnKinds::with_numeric(&self.numeric_columns),
            ..TableViewOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use sheetgrid_core::classify::ColumnKind;
    use sheetgrid_core::grid::Grid;
    use sheetgrid_core::layout::ViewportClass;
    use sheetgrid_core::table::TableView;
    use sheetgrid_core::theme::Theme;

    #[test]
    fn embedded_defaults_deserialize() {
        let config = AppConfig::new(true, None).unwrap();
        assert_eq!(config.source.kind, SourceKind::Demo);
        assert_eq!(config.table.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.table.overscan, 5);
        assert_eq!(config.auth.username, "admin");
        assert!(matches!(
            config.table.width_strategy(),
            WidthStrategy::ContentDerived
        ));
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = AppConfig::new_from_toml(
            r#"
            [source]
            kind = "sheets"
            chunk_rows = 250

            [table]
            width_strategy = "configured"
            numeric_columns = ["Visits"]

            [table.widths]
            Category = { regular = 200 }
            "#,
        )
        .unwrap();
        assert_eq!(config.source.kind, SourceKind::Sheets);
        assert_eq!(config.source.chunk_rows, 250);
        assert_eq!(config.source.sheet, "Sheet1");

        let options = config.table.view_options();
        assert_eq!(options.column_kinds.kind_of("Visits"), ColumnKind::Numeric);
        let WidthStrategy::Configured(widths) = options.width_strategy else {
            panic!("expected configured widths");
        };
        assert_eq!(widths.width_for("Category", ViewportClass::Compact), 200);
        assert_eq!(widths.width_for("Domain", ViewportClass::Regular), 220);
    }

    #[test]
    fn search_debounce_is_held_in_range() {
        let fast = AppConfig::new_from_toml("[table]\nsearch_debounce_ms = 0").unwrap();
        assert_eq!(fast.table.search_debounce(), Duration::from_millis(300));
        assert_eq!(
            fast.table.view_options().search_debounce,
            Duration::from_millis(300)
        );

        let slow = AppConfig::new_from_toml("[table]\nsearch_debounce_ms = 2000").unwrap();
        assert_eq!(slow.table.search_debounce(), Duration::from_millis(500));

        let ok = AppConfig::new_from_toml("[table]\nsearch_debounce_ms = 420").unwrap();
        assert_eq!(ok.table.search_debounce(), Duration::from_millis(420));
    }

    #[test]
    fn shipped_row_height_follows_viewport_class() {
        let config = AppConfig::new(true, None).unwrap();
        let options = config.table.view_options();
        assert_eq!(options.window.row_height(ViewportClass::Regular), 2);
        assert_eq!(options.window.row_height(ViewportClass::Compact), 1);

        let mut view = TableView::with_options(options);
        let mut values = vec![vec!["Domain".to_string()]];
        values.extend((0..10).map(|i| vec![format!("site{i}.com")]));
        view.set_grid(Grid::from_values(values));

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        assert!(!view.set_viewport_width(100));
        view.render(area, &mut buf, &Theme::default());
        assert_eq!(view.state.content_h, 20);

        assert!(view.set_viewport_width(60));
        view.render(area, &mut buf, &Theme::default());
        assert_eq!(view.state.content_h, 10);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::new(false, Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, AppError::MissingConfigFile(_)));
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = AppConfig::new_from_toml("[source]\nkind = \"ftp\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
