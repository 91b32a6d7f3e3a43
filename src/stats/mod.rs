// src/stats/mod.rs
//
// Every aggregate the report prints, computed up front from a loaded
// `Table`. Nothing here writes output.

pub mod frequency;

pub use frequency::FrequencyTable;

use crate::{
    calendar::{CalendarFields, YearMonth},
    config::Config,
    load::{ColumnInfo, Record, Table},
};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_records: usize,
    pub columns: Vec<ColumnInfo>,
    pub file_size_bytes: u64,
    pub row_groups: usize,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl DateRange {
    /// Whole days between the extremes, truncated.
    pub fn days(&self) -> i64 {
        (self.max - self.min).num_days()
    }

    fn of<'a>(timestamps: impl Iterator<Item = &'a NaiveDateTime>) -> Option<Self> {
        timestamps.fold(None, |acc, ts| match acc {
            None => Some(DateRange { min: *ts, max: *ts }),
            Some(r) => Some(DateRange {
                min: r.min.min(*ts),
                max: r.max.max(*ts),
            }),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearShare {
    pub year: i32,
    pub count: usize,
    /// Share of all records, including those without a timestamp.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetOutcome {
    Found {
        count: usize,
        range: DateRange,
        /// (month, count), ascending by month.
        months: Vec<(u32, usize)>,
    },
    Missing {
        years_present: Vec<i32>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetYearCheck {
    pub year: i32,
    pub expected_file: String,
    pub outcome: TargetOutcome,
}

/// Head and tail of the chronological month distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindow {
    pub total_periods: usize,
    pub head: Vec<(YearMonth, usize)>,
    pub tail: Vec<(YearMonth, usize)>,
    /// True when periods were skipped between `head` and `tail`.
    pub elided: bool,
}

impl PeriodWindow {
    /// A `window` of 0 shows every period.
    pub fn from_table(periods: &FrequencyTable<YearMonth>, window: usize) -> Self {
        let all: Vec<(YearMonth, usize)> = periods.sorted().map(|(k, c)| (*k, c)).collect();
        let total_periods = all.len();
        if window == 0 || total_periods <= window.saturating_mul(2) {
            return Self {
                total_periods,
                head: all,
                tail: Vec::new(),
                elided: false,
            };
        }
        Self {
            total_periods,
            head: all[..window].to_vec(),
            tail: all[total_periods - window..].to_vec(),
            elided: true,
        }
    }

    #[cfg(test)]
    fn shown(&self) -> impl Iterator<Item = &(YearMonth, usize)> {
        self.head.iter().chain(self.tail.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    City,
    Station,
    Rating,
}

impl CategoryKind {
    pub fn heading(&self) -> &'static str {
        match self {
            CategoryKind::City => "Cities Analysis",
            CategoryKind::Station => "Stations Analysis",
            CategoryKind::Rating => "AQI Rating Analysis",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            CategoryKind::City => "cities",
            CategoryKind::Station => "stations",
            CategoryKind::Rating => "ratings",
        }
    }

    fn value<'a>(&self, record: &'a Record) -> Option<&'a str> {
        match self {
            CategoryKind::City => record.city.as_deref(),
            CategoryKind::Station => record.station.as_deref(),
            CategoryKind::Rating => record.rating.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub kind: CategoryKind,
    pub distinct: usize,
    pub top: Vec<(String, usize)>,
}

impl CategoryBreakdown {
    pub fn compute(kind: CategoryKind, records: &[Record], top_n: usize) -> Self {
        let counts: FrequencyTable<&str> =
            records.iter().filter_map(|r| kind.value(r)).collect();
        Self {
            kind,
            distinct: counts.len(),
            top: counts
                .top(top_n)
                .into_iter()
                .map(|(k, c)| (k.to_string(), c))
                .collect(),
        }
    }
}

/// Fields of one sampled row. `None` means the column is absent or the
/// cell is null.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub timestamp: NaiveDateTime,
    pub city: Option<String>,
    pub station: Option<String>,
    pub aqi: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearSample {
    pub year: i32,
    pub rows: Vec<SampleRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingSummary {
    pub total_records: usize,
    pub years: Vec<i32>,
    pub target_year: i32,
    /// `Some` when the target year has data.
    pub target_count: Option<usize>,
    pub most_recent_year: Option<i32>,
}

/// Everything printed for one file, in print order.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub overview: Overview,
    pub null_timestamps: usize,
    pub range: Option<DateRange>,
    pub years: Vec<YearShare>,
    pub target: TargetYearCheck,
    pub periods: PeriodWindow,
    pub categories: Vec<CategoryBreakdown>,
    pub samples: Vec<YearSample>,
    pub summary: ClosingSummary,
}

impl Report {
    pub fn build(table: &Table, cfg: &Config) -> Self {
        let total = table.len();

        let mut years: FrequencyTable<i32> = FrequencyTable::new();
        let mut periods: FrequencyTable<YearMonth> = FrequencyTable::new();
        for cal in table.records.iter().filter_map(Record::calendar) {
            years.add(cal.year);
            periods.add(cal.year_month);
        }
        let null_timestamps = total - years.total();

        let range = DateRange::of(table.records.iter().filter_map(|r| r.timestamp.as_ref()));

        let year_shares = years
            .sorted()
            .map(|(year, count)| YearShare {
                year: *year,
                count,
                percent: percent(count, total),
            })
            .collect();

        let target = target_year_check(table, cfg, &years);

        let present = table.present;
        let categories = [
            (CategoryKind::City, present.city),
            (CategoryKind::Station, present.station),
            (CategoryKind::Rating, present.rating),
        ]
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(kind, _)| CategoryBreakdown::compute(kind, &table.records, cfg.top_n))
        .collect();

        let samples = sample_years(table, &years, cfg.sample_years, cfg.samples_per_year);

        let most_recent_year = years.last_key().copied();
        let year_list: Vec<i32> = years.keys().copied().collect();
        let target_count = match years.get(&cfg.target_year) {
            0 => None,
            n => Some(n),
        };
        let summary = ClosingSummary {
            total_records: total,
            most_recent_year,
            years: year_list,
            target_year: cfg.target_year,
            target_count,
        };

        Report {
            overview: Overview {
                total_records: total,
                columns: table.info.columns.clone(),
                file_size_bytes: table.info.file_size_bytes,
                row_groups: table.info.row_groups,
                created_by: table.info.created_by.clone(),
            },
            null_timestamps,
            range,
            years: year_shares,
            target,
            periods: PeriodWindow::from_table(&periods, cfg.period_window),
            categories,
            samples,
            summary,
        }
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn target_year_check(table: &Table, cfg: &Config, years: &FrequencyTable<i32>) -> TargetYearCheck {
    let in_target: Vec<&NaiveDateTime> = table
        .records
        .iter()
        .filter_map(|r| r.timestamp.as_ref())
        .filter(|ts| CalendarFields::from(*ts).year == cfg.target_year)
        .collect();

    let outcome = match DateRange::of(in_target.iter().copied()) {
        Some(range) => {
            let months: FrequencyTable<u32> = in_target
                .iter()
                .map(|ts| CalendarFields::from(*ts).month)
                .collect();
            TargetOutcome::Found {
                count: in_target.len(),
                range,
                months: months.sorted().map(|(m, c)| (*m, c)).collect(),
            }
        }
        None => TargetOutcome::Missing {
            years_present: years.keys().copied().collect(),
        },
    };

    TargetYearCheck {
        year: cfg.target_year,
        expected_file: cfg.expected_file_name(),
        outcome,
    }
}

fn sample_years(
    table: &Table,
    years: &FrequencyTable<i32>,
    max_years: usize,
    per_year: usize,
) -> Vec<YearSample> {
    years
        .keys()
        .take(max_years)
        .map(|&year| YearSample {
            year,
            rows: table
                .records
                .iter()
                .filter_map(|r| match r.timestamp {
                    Some(ts) if r.year() == Some(year) => Some(SampleRow {
                        timestamp: ts,
                        city: r.city.clone(),
                        station: r.station.clone(),
                        aqi: r.aqi.clone(),
                    }),
                    _ => None,
                })
                .take(per_year)
                .collect(),
        })
        .collect()
}
