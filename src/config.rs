//! Run settings, read from an optional JSON file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "SHOWS_CONFIG";
/// Settings file looked up in the working directory when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "shows.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid chart size {0}x{1}")]
    ChartSize(u32, u32),
    #[error("Year tick step must be at least 1")]
    TickStep,
}

/// Everything one run needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Open the written chart with the system viewer.
    pub open_chart: bool,
    pub export_csv: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
    pub chart: ChartStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("shows.csv"),
            output: PathBuf::from("shows_per_year.png"),
            open_chart: true,
            export_csv: None,
            export_summary: None,
            chart: ChartStyle::default(),
        }
    }
}

/// Chart look. Colors are RGB triples, alphas are in `0.0..=1.0`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub line_color: [u8; 3],
    pub marker_radius: u32,
    pub tick_step_years: i64,
    pub tick_label_angle: f32,
    pub annotation_font_size: u32,
    pub summary_fill: [u8; 3],
    pub summary_alpha: f64,
    pub grid_alpha: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        // 12x6 figure at 100 px per unit
        Self {
            width: 1200,
            height: 600,
            title: "TV Shows Aired per Year".to_string(),
            x_label: "Year".to_string(),
            y_label: "Number of Shows".to_string(),
            line_color: [128, 0, 128],
            marker_radius: 4,
            tick_step_years: 5,
            tick_label_angle: 45.0,
            annotation_font_size: 11,
            summary_fill: [255, 255, 224],
            summary_alpha: 0.5,
            grid_alpha: 0.6,
        }
    }
}

impl Settings {
    /// Load settings from `$SHOWS_CONFIG`, else `shows.json`, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    log::debug!("No {} found, using default settings", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.chart.width, self.chart.height);
        if width < 200 || height < 150 {
            return Err(ConfigError::ChartSize(width, height));
        }
        if self.chart.tick_step_years < 1 {
            return Err(ConfigError::TickStep);
        }
        Ok(())
    }
}
