// src/report/mod.rs

pub mod format;

use crate::stats::{CategoryBreakdown, Report, TargetOutcome, TargetYearCheck, YearSample};
use format::{megabytes, or_placeholder, thousands, timestamp, year_list};
use std::io::{self, Write};

/// Print a computed report, section by section, in run order.
pub fn render<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    let ov = &report.overview;
    writeln!(out, "\n=== Basic Information ===")?;
    writeln!(out, "   Total records: {}", thousands(ov.total_records))?;
    writeln!(out, "   Columns: {}", ov.columns.len())?;
    writeln!(out, "   File size: {}", megabytes(ov.file_size_bytes))?;
    writeln!(out, "   Row groups: {}", ov.row_groups)?;
    writeln!(
        out,
        "   Created by: {}",
        ov.created_by.as_deref().unwrap_or("<unknown>")
    )?;

    writeln!(out, "\n=== Column Information ===")?;
    for col in &ov.columns {
        writeln!(out, "   - {}: {}", col.name, col.data_type)?;
    }

    writeln!(out, "\n=== Datetime Analysis ===")?;
    match &report.range {
        Some(range) => {
            writeln!(
                out,
                "   Date range: {} to {}",
                timestamp(&range.min),
                timestamp(&range.max)
            )?;
            writeln!(out, "   Duration: {} days", range.days())?;
        }
        None => writeln!(out, "   Date range: {}", format::PLACEHOLDER)?,
    }
    if report.null_timestamps > 0 {
        writeln!(
            out,
            "   Records without a timestamp: {}",
            thousands(report.null_timestamps)
        )?;
    }

    writeln!(out, "\n=== Records by Year ===")?;
    for y in &report.years {
        writeln!(
            out,
            "   {}: {} records ({:.1}%)",
            y.year,
            thousands(y.count),
            y.percent
        )?;
    }

    render_target(&report.target, out)?;

    writeln!(out, "\n=== Monthly Distribution (All Years) ===")?;
    let periods = &report.periods;
    if periods.elided {
        writeln!(
            out,
            "   Showing first {} and last {} of {} months:",
            periods.head.len(),
            periods.tail.len(),
            periods.total_periods
        )?;
    } else {
        writeln!(out, "   Showing all {} months:", periods.total_periods)?;
    }
    for (period, count) in &periods.head {
        writeln!(out, "   {}: {} records", period, thousands(*count))?;
    }
    if periods.elided {
        writeln!(out, "   ...")?;
    }
    for (period, count) in &periods.tail {
        writeln!(out, "   {}: {} records", period, thousands(*count))?;
    }

    for breakdown in &report.categories {
        render_category(breakdown, out)?;
    }

    writeln!(out, "\n=== Sample Data ===")?;
    for sample in &report.samples {
        render_sample(sample, out)?;
    }

    render_summary(report, out)
}

fn render_target<W: Write>(target: &TargetYearCheck, out: &mut W) -> io::Result<()> {
    match &target.outcome {
        TargetOutcome::Found {
            count,
            range,
            months,
        } => {
            writeln!(out, "\n✔ {} Data Found", target.year)?;
            writeln!(out, "   Records: {}", thousands(*count))?;
            writeln!(
                out,
                "   Date range: {} to {}",
                timestamp(&range.min),
                timestamp(&range.max)
            )?;
            writeln!(out, "   Monthly distribution in {}:", target.year)?;
            for (month, n) in months {
                writeln!(out, "     Month {}: {} records", month, thousands(*n))?;
            }
        }
        TargetOutcome::Missing { years_present } => {
            writeln!(out, "\n✘ No {} Data Found", target.year)?;
            writeln!(
                out,
                "   Expected based on filename: {}",
                target.expected_file
            )?;
            writeln!(
                out,
                "   Actual years available: {}",
                year_list(years_present)
            )?;
        }
    }
    Ok(())
}

fn render_category<W: Write>(b: &CategoryBreakdown, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n=== {} ===", b.kind.heading())?;
    writeln!(out, "   Total {}: {}", b.kind.plural(), thousands(b.distinct))?;
    for (key, count) in &b.top {
        writeln!(out, "   {}: {} records", key, thousands(*count))?;
    }
    Ok(())
}

fn render_sample<W: Write>(sample: &YearSample, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n   Sample from {}:", sample.year)?;
    for row in &sample.rows {
        writeln!(
            out,
            "     {} | {} | {} | AQI: {}",
            timestamp(&row.timestamp),
            or_placeholder(row.city.as_deref()),
            or_placeholder(row.station.as_deref()),
            or_placeholder(row.aqi.as_deref())
        )?;
    }
    Ok(())
}

fn render_summary<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    let s = &report.summary;
    writeln!(out, "\n✔ Analysis completed successfully!")?;
    writeln!(out, "\n=== Key Findings ===")?;
    writeln!(
        out,
        "   - File contains {} total records",
        thousands(s.total_records)
    )?;
    writeln!(out, "   - Years available: {}", year_list(&s.years))?;
    match s.target_count {
        Some(n) => writeln!(out, "   - {} data: {} records", s.target_year, thousands(n))?,
        None => {
            writeln!(out, "   - No {} data found (expected issue)", s.target_year)?;
            match s.most_recent_year {
                Some(y) => writeln!(out, "   - Most recent year: {}", y)?,
                None => writeln!(out, "   - Most recent year: {}", format::PLACEHOLDER)?,
            }
        }
    }
    writeln!(
        out,
        "\nThis should show why the year-to-date heatmap may be showing the wrong years."
    )
}
