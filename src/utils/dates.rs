use chrono::NaiveDate;

use crate::errors::{DeaneryError, Result};

// 数据库中日期统一存为 YYYY-MM-DD
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| DeaneryError::date_parse(format!("'{raw}': {e}")))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 开始日期不能晚于结束日期
pub fn ensure_date_range(start: &NaiveDate, end: &NaiveDate) -> Result<()> {
    if start > end {
        return Err(DeaneryError::invalid_input(format!(
            "Start date {} is after end date {}",
            format_date(start),
            format_date(end)
        )));
    }
    Ok(())
}
