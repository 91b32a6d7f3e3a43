use chrono::{Datelike, NaiveDateTime};
use std::fmt;

/// A calendar month, ordered chronologically. Displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(ts: &NaiveDateTime) -> Self {
        Self::new(ts.year(), ts.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Calendar fields derived from one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub year_month: YearMonth,
}

impl From<&NaiveDateTime> for CalendarFields {
    fn from(ts: &NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
            year_month: YearMonth::of(ts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(YearMonth::new(2024, 3).to_string(), "2024-03");
        assert_eq!(YearMonth::new(987, 11).to_string(), "0987-11");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut v = vec![
            YearMonth::new(2025, 1),
            YearMonth::new(2024, 12),
            YearMonth::new(2024, 2),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                YearMonth::new(2024, 2),
                YearMonth::new(2024, 12),
                YearMonth::new(2025, 1),
            ]
        );
    }

    #[test]
    fn test_fields_from_timestamp() {
        let f = CalendarFields::from(&ts(2024, 7, 31));
        assert_eq!(f.year, 2024);
        assert_eq!(f.month, 7);
        assert_eq!(f.year_month, YearMonth::new(2024, 7));
    }
}
