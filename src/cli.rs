//! Command-line arguments. A bare invocation needs none of them.

use crate::config::Config;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Summarise the years, months, cities and stations in an air-quality Parquet file.
#[derive(Parser, Debug)]
#[command(name = "aqscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Parquet file to inspect (defaults to the dashboard's data file)
    pub path: Option<PathBuf>,

    /// Year whose presence is checked
    #[arg(short, long)]
    pub target_year: Option<i32>,

    /// YAML file with column names and display limits
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the YAML file if given, then explicit flags.
    pub fn resolve(self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => Config::from_yaml_file(path)?,
            None => Config::default(),
        };
        Ok(base.with_overrides(self.path, self.target_year))
    }
}
