// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Where the dashboard build expects its data file.
pub const DEFAULT_PARQUET_PATH: &str =
    "static/data/african_cities_air_quality_2024_2026.parquet";

/// The year the heatmap is supposed to show.
pub const DEFAULT_TARGET_YEAR: i32 = 2025;

/// Everything a run needs to know. Every field has a default, so a YAML
/// file only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub path: PathBuf,
    pub target_year: i32,
    pub timestamp_column: String,
    pub city_column: String,
    pub station_column: String,
    pub aqi_column: String,
    pub rating_column: String,
    /// Periods shown at each end of the month distribution.
    pub period_window: usize,
    pub top_n: usize,
    pub sample_years: usize,
    pub samples_per_year: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PARQUET_PATH),
            target_year: DEFAULT_TARGET_YEAR,
            timestamp_column: "datetime".to_string(),
            city_column: "city".to_string(),
            station_column: "station_id".to_string(),
            aqi_column: "overall_aqi".to_string(),
            rating_column: "overall_rating".to_string(),
            period_window: 10,
            top_n: 10,
            sample_years: 3,
            samples_per_year: 2,
        }
    }
}

impl Config {
    /// Read a YAML config file. Missing keys fall back to defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // an empty document deserializes to unit, not a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply command-line overrides on top of whatever was loaded.
    pub fn with_overrides(mut self, path: Option<PathBuf>, target_year: Option<i32>) -> Self {
        if let Some(p) = path {
            self.path = p;
        }
        if let Some(y) = target_year {
            self.target_year = y;
        }
        self
    }

    /// File name shown when the target year is missing.
    pub fn expected_file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
