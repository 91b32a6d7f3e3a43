use crate::error::InspectError;
use anyhow::Result;
use arrow::{
    array::{Array, AsArray},
    compute::cast,
    datatypes::{
        DataType, Date32Type, Date64Type, Int64Type, TimeUnit, TimestampMicrosecondType,
        TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType,
    },
    util::display::{ArrayFormatter, FormatOptions},
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use tracing::warn;

/// Naive formats tried, in order, after RFC 3339.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Timestamp(TimeUnit, FixedOffset),
    Date32,
    Date64,
    /// Bare integer epoch; unit guessed from magnitude.
    Integer,
    Text,
}

/// Reads one column of any supported physical type as local wall-clock
/// datetimes. Built once per column, then applied to every batch.
#[derive(Debug, Clone)]
pub struct TimestampReader {
    column: String,
    encoding: Encoding,
}

impl TimestampReader {
    pub fn for_field(column: &str, data_type: &DataType) -> Result<Self, InspectError> {
        let encoding = match data_type {
            DataType::Timestamp(unit, tz) => {
                let offset = match tz.as_deref() {
                    None => utc(),
                    Some(name) => parse_offset(name).unwrap_or_else(|| {
                        warn!(column, tz = name, "unrecognised timezone, reading as UTC");
                        utc()
                    }),
                };
                Encoding::Timestamp(*unit, offset)
            }
            DataType::Date32 => Encoding::Date32,
            DataType::Date64 => Encoding::Date64,
            DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 => {
                Encoding::Integer
            }
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Encoding::Text,
            DataType::Dictionary(_, value)
                if matches!(
                    value.as_ref(),
                    DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
                ) =>
            {
                Encoding::Text
            }
            other => {
                return Err(InspectError::UnsupportedTimestampType {
                    column: column.to_string(),
                    data_type: other.clone(),
                })
            }
        };
        Ok(Self {
            column: column.to_string(),
            encoding,
        })
    }

    /// Convert one batch worth of cells. `row_offset` is the index of the
    /// batch's first row in the file, used for error messages only.
    ///
    /// A non-null cell that cannot be placed on the calendar is an error,
    /// never a silent null.
    pub fn read(&self, array: &dyn Array, row_offset: usize) -> Result<Vec<Option<NaiveDateTime>>> {
        let out = match self.encoding {
            Encoding::Timestamp(unit, offset) => {
                let to_local = |v: i64| from_epoch(v, unit).and_then(|dt| shift(dt, offset));
                match unit {
                    TimeUnit::Second => self.epochs(
                        array.as_primitive::<TimestampSecondType>().iter(),
                        row_offset,
                        to_local,
                    )?,
                    TimeUnit::Millisecond => self.epochs(
                        array.as_primitive::<TimestampMillisecondType>().iter(),
                        row_offset,
                        to_local,
                    )?,
                    TimeUnit::Microsecond => self.epochs(
                        array.as_primitive::<TimestampMicrosecondType>().iter(),
                        row_offset,
                        to_local,
                    )?,
                    TimeUnit::Nanosecond => self.epochs(
                        array.as_primitive::<TimestampNanosecondType>().iter(),
                        row_offset,
                        to_local,
                    )?,
                }
            }
            Encoding::Date32 => self.epochs(
                array
                    .as_primitive::<Date32Type>()
                    .iter()
                    .map(|v| v.map(i64::from)),
                row_offset,
                |days| from_epoch(days.checked_mul(86_400)?, TimeUnit::Second),
            )?,
            Encoding::Date64 => self.epochs(
                array.as_primitive::<Date64Type>().iter(),
                row_offset,
                |ms| from_epoch(ms, TimeUnit::Millisecond),
            )?,
            Encoding::Integer => {
                // safe cast turns out-of-range unsigned values into nulls
                let ints = cast(array, &DataType::Int64)?;
                let ints = ints.as_primitive::<Int64Type>();
                if let Some(i) = (0..array.len()).find(|&i| array.is_valid(i) && ints.is_null(i)) {
                    let formatter = ArrayFormatter::try_new(array, &FormatOptions::default())?;
                    return Err(self
                        .unparseable(row_offset + i, formatter.value(i).to_string())
                        .into());
                }
                self.epochs(ints.iter(), row_offset, |raw| {
                    from_epoch(raw, guess_epoch_unit(raw))
                })?
            }
            Encoding::Text => {
                let text = cast(array, &DataType::Utf8)?;
                let mut out = Vec::with_capacity(text.len());
                for (i, cell) in text.as_string::<i32>().iter().enumerate() {
                    let Some(raw) = cell else {
                        out.push(None);
                        continue;
                    };
                    let cleaned = clean_str(raw);
                    if cleaned.is_empty() {
                        out.push(None);
                        continue;
                    }
                    let parsed = parse_text(cleaned)
                        .ok_or_else(|| self.unparseable(row_offset + i, raw.to_string()))?;
                    out.push(Some(parsed));
                }
                out
            }
        };
        Ok(out)
    }

    fn epochs<I, F>(
        &self,
        cells: I,
        row_offset: usize,
        to_local: F,
    ) -> Result<Vec<Option<NaiveDateTime>>, InspectError>
    where
        I: Iterator<Item = Option<i64>>,
        F: Fn(i64) -> Option<NaiveDateTime>,
    {
        cells
            .enumerate()
            .map(|(i, cell)| match cell {
                None => Ok(None),
                Some(v) => to_local(v)
                    .map(Some)
                    .ok_or_else(|| self.unparseable(row_offset + i, v.to_string())),
            })
            .collect()
    }

    fn unparseable(&self, row: usize, value: String) -> InspectError {
        InspectError::UnparseableTimestamp {
            column: self.column.clone(),
            row,
            value,
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// `UTC`, `Z`, `+HH:MM`, `-HHMM`, `+HH`. Named zones other than UTC are not
/// resolved.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim();
    if matches!(tz, "UTC" | "Z" | "GMT" | "Etc/UTC" | "utc") {
        return Some(utc());
    }
    let (sign, rest) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (h, m) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[0..2].parse::<i32>().ok()?, digits[2..4].parse::<i32>().ok()?),
        _ => return None,
    };
    if m >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (h * 3600 + m * 60))
}

fn from_epoch(v: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let dt = match unit {
        TimeUnit::Second => DateTime::from_timestamp(v, 0)?,
        TimeUnit::Millisecond => DateTime::from_timestamp_millis(v)?,
        TimeUnit::Microsecond => DateTime::from_timestamp_micros(v)?,
        TimeUnit::Nanosecond => DateTime::from_timestamp_nanos(v),
    };
    Some(dt.naive_utc())
}

/// Wall-clock time at `offset`; `None` when that falls off the calendar.
fn shift(utc_naive: NaiveDateTime, offset: FixedOffset) -> Option<NaiveDateTime> {
    utc_naive.checked_add_offset(offset)
}

/// Epoch integers carry no unit. Pick the one that puts the value in a
/// plausible range: anything from 1e11 up is at least milliseconds.
pub fn guess_epoch_unit(raw: i64) -> TimeUnit {
    match raw.unsigned_abs() {
        v if v >= 100_000_000_000_000_000 => TimeUnit::Nanosecond,
        v if v >= 100_000_000_000_000 => TimeUnit::Microsecond,
        v if v >= 100_000_000_000 => TimeUnit::Millisecond,
        _ => TimeUnit::Second,
    }
}

/// Trim whitespace + strip outer quotes if present.
fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

pub fn parse_text(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
