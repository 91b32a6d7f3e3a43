// src/load/mod.rs

pub mod cells;
pub mod timestamp;

use crate::{calendar::CalendarFields, config::Config, error::InspectError};
use anyhow::{Context, Result};
use arrow::{datatypes::DataType, record_batch::RecordBatch};
use chrono::NaiveDateTime;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::{fs::File, path::Path};
use tracing::{debug, info, warn};

pub use timestamp::TimestampReader;

const BATCH_SIZE: usize = 8192;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: DataType,
}

/// File-level facts gathered while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub columns: Vec<ColumnInfo>,
    pub row_groups: usize,
    pub created_by: Option<String>,
    pub file_size_bytes: u64,
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// The file as Arrow left it, before any column is interpreted.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub info: TableInfo,
    pub batches: Vec<RecordBatch>,
}

impl RawTable {
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }
}

/// One measurement row. Only the columns the report looks at are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: Option<NaiveDateTime>,
    pub city: Option<String>,
    pub station: Option<String>,
    pub aqi: Option<String>,
    pub rating: Option<String>,
}

impl Record {
    pub fn calendar(&self) -> Option<CalendarFields> {
        self.timestamp.as_ref().map(CalendarFields::from)
    }

    pub fn year(&self) -> Option<i32> {
        self.calendar().map(|c| c.year)
    }
}

/// Which optional columns the file actually carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentColumns {
    pub city: bool,
    pub station: bool,
    pub aqi: bool,
    pub rating: bool,
}

#[derive(Debug, Clone)]
pub struct Table {
    pub info: TableInfo,
    pub present: PresentColumns,
    pub records: Vec<Record>,
}

impl Table {
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Interpret the raw batches: coerce the timestamp column and pull the
    /// categorical columns out as text.
    pub fn from_raw(raw: RawTable, cfg: &Config) -> Result<Self> {
        let ts_name = cfg.timestamp_column.as_str();
        let ts_info = raw
            .info
            .column(ts_name)
            .ok_or_else(|| InspectError::MissingColumn {
                column: ts_name.to_string(),
            })?;
        let reader = TimestampReader::for_field(ts_name, &ts_info.data_type)?;

        let present = PresentColumns {
            city: raw.info.has_column(&cfg.city_column),
            station: raw.info.has_column(&cfg.station_column),
            aqi: raw.info.has_column(&cfg.aqi_column),
            rating: raw.info.has_column(&cfg.rating_column),
        };

        let mut records = Vec::with_capacity(raw.num_rows());
        let mut offset = 0;
        for batch in &raw.batches {
            let ts_col = batch
                .column_by_name(ts_name)
                .ok_or_else(|| InspectError::MissingColumn {
                    column: ts_name.to_string(),
                })?;
            let timestamps = reader
                .read(ts_col.as_ref(), offset)
                .with_context(|| format!("normalizing column `{}`", ts_name))?;

            let mut city = optional_text(batch, &cfg.city_column)?.into_iter();
            let mut station = optional_text(batch, &cfg.station_column)?.into_iter();
            let mut aqi = optional_text(batch, &cfg.aqi_column)?.into_iter();
            let mut rating = optional_text(batch, &cfg.rating_column)?.into_iter();

            for timestamp in timestamps {
                records.push(Record {
                    timestamp,
                    city: city.next().flatten(),
                    station: station.next().flatten(),
                    aqi: aqi.next().flatten(),
                    rating: rating.next().flatten(),
                });
            }
            offset += batch.num_rows();
        }

        let missing = records.iter().filter(|r| r.timestamp.is_none()).count();
        if missing > 0 {
            warn!(
                column = ts_name,
                rows = missing,
                "null timestamps excluded from calendar aggregates"
            );
        }

        Ok(Self {
            info: raw.info,
            present,
            records,
        })
    }
}

fn optional_text(batch: &RecordBatch, column: &str) -> Result<Vec<Option<String>>> {
    match batch.column_by_name(column) {
        Some(arr) => cells::text_cells(arr.as_ref())
            .with_context(|| format!("reading column `{}` as text", column)),
        None => Ok(vec![None; batch.num_rows()]),
    }
}

/// Open a Parquet file and pull every record batch into memory.
pub fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let file_size_bytes = file
        .metadata()
        .with_context(|| format!("stat {}", path.display()))?
        .len();

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("reading Parquet metadata of {}", path.display()))?;
    let row_groups = builder.metadata().num_row_groups();
    let created_by = builder
        .metadata()
        .file_metadata()
        .created_by()
        .map(str::to_string);
    let columns = builder
        .schema()
        .fields()
        .iter()
        .map(|f| ColumnInfo {
            name: f.name().clone(),
            data_type: f.data_type().clone(),
        })
        .collect();

    let reader = builder.with_batch_size(BATCH_SIZE).build()?;
    let mut batches = Vec::new();
    for batch in reader {
        let batch = batch.with_context(|| format!("decoding batch from {}", path.display()))?;
        debug!(rows = batch.num_rows(), "read batch");
        batches.push(batch);
    }

    let raw = RawTable {
        info: TableInfo {
            columns,
            row_groups,
            created_by,
            file_size_bytes,
        },
        batches,
    };
    info!(
        path = %path.display(),
        rows = raw.num_rows(),
        row_groups,
        "loaded parquet"
    );
    Ok(raw)
}

/// Load and normalize in one go.
pub fn load_table(path: &Path, cfg: &Config) -> Result<Table> {
    let raw = read_parquet(path)?;
    Table::from_raw(raw, cfg)
}
