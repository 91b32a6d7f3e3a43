pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod load;
pub mod report;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_util;

use anyhow::Result;
use config::Config;
use error::InspectError;
use stats::Report;
use tracing::info;

/// The input must exist before anything is read. Runs ahead of any analysis.
pub fn check_input(cfg: &Config) -> Result<(), InspectError> {
    if cfg.path.exists() {
        Ok(())
    } else {
        Err(InspectError::NotFound {
            path: cfg.path.clone(),
        })
    }
}

/// Load the configured file and compute every section of the report.
pub fn analyze_parquet_file(cfg: &Config) -> Result<Report> {
    let table = load::load_table(&cfg.path, cfg)?;
    let report = Report::build(&table, cfg);
    info!(
        records = report.overview.total_records,
        years = report.years.len(),
        periods = report.periods.total_periods,
        "analysis built"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{batch_from_owned, monthly_rows, write_parquet};
    use tempfile::tempdir;

    #[test]
    fn test_analyze_end_to_end() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("african_cities_air_quality_2024_2026.parquet");
        write_parquet(&path, &batch_from_owned(&monthly_rows(2024, 6, 9, 4)))?;

        let cfg = Config::default().with_overrides(Some(path), None);
        let report = analyze_parquet_file(&cfg)?;
        assert_eq!(report.overview.total_records, 36);
        assert_eq!(report.summary.years, vec![2024, 2025]);
        assert_eq!(report.summary.target_count, Some(8));
        Ok(())
    }

    #[test]
    fn test_check_input_reports_missing_file() {
        let cfg = Config::default().with_overrides(Some("/nonexistent/aq.parquet".into()), None);
        let err = check_input(&cfg).unwrap_err();
        assert!(matches!(&err, InspectError::NotFound { path } if path == &cfg.path));
        assert_eq!(
            err.to_string(),
            "Parquet file not found: /nonexistent/aq.parquet"
        );
    }

    #[test]
    fn test_check_input_accepts_existing_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("aq.parquet");
        write_parquet(&path, &batch_from_owned(&monthly_rows(2024, 1, 1, 1)))?;
        check_input(&Config::default().with_overrides(Some(path), None))?;
        Ok(())
    }

    #[test]
    fn test_analyze_missing_file_is_an_error() {
        let cfg = Config::default().with_overrides(Some("/nonexistent/aq.parquet".into()), None);
        assert!(analyze_parquet_file(&cfg).is_err());
    }
}
