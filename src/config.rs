use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub top: usize,
    pub interval_secs: f64,
    pub color: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            top: 20,
            interval_secs: 2.0,
            color: "auto".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub usage_bar_width: usize,
    pub graph_bar_width: usize,
    pub graph_mode_bar_width: usize,
    pub dashboard_graph_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            usage_bar_width: 50,
            graph_bar_width: 60,
            graph_mode_bar_width: 70,
            dashboard_graph_limit: 10,
        }
    }
}

impl Config {
    /// Replaces values no mode can work with by their defaults.
    pub fn sanitized(mut self) -> Self {
        let general = GeneralConfig::default();
        if !is_valid_interval(self.general.interval_secs) {
            warn!(
                interval_secs = self.general.interval_secs,
                "ignoring invalid refresh interval from config"
            );
            self.general.interval_secs = general.interval_secs;
        }

        let display = DisplayConfig::default();
        if self.display.usage_bar_width == 0 {
            self.display.usage_bar_width = display.usage_bar_width;
        }
        if self.display.graph_bar_width == 0 {
            self.display.graph_bar_width = display.graph_bar_width;
        }
        if self.display.graph_mode_bar_width == 0 {
            self.display.graph_mode_bar_width = display.graph_mode_bar_width;
        }
        self
    }
}

pub fn is_valid_interval(secs: f64) -> bool {
    secs.is_finite() && secs > 0.0
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("meminspector").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), %err, "config file unreadable, using defaults");
            return Config::default();
        }
    };
    match toml::from_str::<Config>(&contents) {
        Ok(config) => config.sanitized(),
        Err(err) => {
            warn!(path = %path.display(), %err, "config file invalid, using defaults");
            Config::default()
        }
    }
}
