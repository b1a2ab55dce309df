use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{AlignError, AlignResult};

/// Days elapsed before the first of each month in a non-leap year.
pub(crate) const CUMULATIVE_DAYS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

pub(crate) const SEPTEMBER: usize = 8;

/// Sep..=Dec length; the index of Jan 1.
pub(crate) const SECOND_HALF_OFFSET: u16 = CUMULATIVE_DAYS[11] - CUMULATIVE_DAYS[SEPTEMBER] + 31;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> AlignResult<f64> {
    value.to_f64().ok_or_else(|| {
        AlignError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Parses `YYYY-MM-DD`, tolerating a trailing time component.
///
/// Timestamps keep their local calendar date; the offset is not applied.
pub fn parse_iso_date(input: &str) -> AlignResult<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(stamp.date());
        }
    }

    Err(AlignError::InvalidDate(format!(
        "`{input}` is not an ISO-8601 calendar date"
    )))
}
