use chrono::{NaiveDateTime, Timelike};

pub const PLACEHOLDER: &str = "N/A";

/// `1234567` → `1,234,567`.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Seconds precision, fractional part only when there is one.
pub fn timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() == 0 {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}

pub fn or_placeholder(v: Option<&str>) -> &str {
    v.unwrap_or(PLACEHOLDER)
}

/// `[2024, 2025]`
pub fn year_list(years: &[i32]) -> String {
    let inner: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    format!("[{}]", inner.join(", "))
}
