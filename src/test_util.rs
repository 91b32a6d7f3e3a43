//! Fixture builders shared by the unit tests.

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, StringArray, TimestampMillisecondArray},
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use chrono::{Months, NaiveDate, NaiveDateTime};
use parquet::arrow::ArrowWriter;
use std::{fs::File, path::Path, sync::Arc};

use crate::config::Config;
use crate::load::{read_parquet, RawTable, Table};

pub fn parse_ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("fixture timestamp")
}

/// `datetime` (ms, naive), `city`, `station_id`, `overall_aqi`.
pub fn air_quality_batch(rows: &[(&str, &str, &str, f64)]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new(
            "datetime",
            DataType::Timestamp(TimeUnit::Millisecond, None),
            true,
        ),
        Field::new("city", DataType::Utf8, true),
        Field::new("station_id", DataType::Utf8, true),
        Field::new("overall_aqi", DataType::Float64, true),
    ]));
    let ts: Vec<i64> = rows
        .iter()
        .map(|r| parse_ts(r.0).and_utc().timestamp_millis())
        .collect();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(TimestampMillisecondArray::from(ts)),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.2))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.3))),
    ];
    RecordBatch::try_new(schema, columns).expect("fixture batch")
}

/// `per_month` rows on the 15th of each of `months` consecutive months
/// starting at `start_year`-`start_month`.
pub fn monthly_rows(
    start_year: i32,
    start_month: u32,
    months: u32,
    per_month: usize,
) -> Vec<(String, &'static str, &'static str, f64)> {
    let start = NaiveDate::from_ymd_opt(start_year, start_month, 15).expect("fixture start");
    let mut out = Vec::new();
    for m in 0..months {
        let day = start + Months::new(m);
        for i in 0..per_month {
            let ts = day.and_hms_opt(i as u32 % 24, 0, 0).expect("fixture hour");
            out.push((
                ts.format("%Y-%m-%d %H:%M:%S").to_string(),
                "nairobi",
                "NBO-01",
                50.0,
            ));
        }
    }
    out
}

/// Text `datetime` with optional nulls, plus a `city` column.
pub fn nullable_text_batch(rows: &[(Option<&str>, &str)]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("datetime", DataType::Utf8, true),
        Field::new("city", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))),
    ];
    RecordBatch::try_new(schema, columns).expect("fixture batch")
}

pub fn batch_from_owned(rows: &[(String, &str, &str, f64)]) -> RecordBatch {
    let borrowed: Vec<(&str, &str, &str, f64)> = rows
        .iter()
        .map(|(t, c, s, a)| (t.as_str(), *c, *s, *a))
        .collect();
    air_quality_batch(&borrowed)
}

pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// Write `batch` to a temp file, then load it back through the real reader.
pub fn table_via_parquet(batch: &RecordBatch, cfg: &Config) -> Result<Table> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fixture.parquet");
    write_parquet(&path, batch)?;
    let raw: RawTable = read_parquet(&path)?;
    Table::from_raw(raw, cfg)
}
