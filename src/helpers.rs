use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use chrono::{DateTime, Timelike, Utc};

use crate::error::Error;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Parses an envelope timestamp (unix seconds, string-typed on the wire).
pub fn parse_timestamp(at: &str) -> Result<DateTime<Utc>, Error> {
    let sec: i64 = at.parse()?;
    DateTime::from_timestamp(sec, 0).ok_or_else(|| {
        Error::DecodeDateTimeError(format!("event timestamp {}", sec))
    })
}

/// Calendar-day identifier: floor(unix seconds / 86400).
pub fn day_id(at: &DateTime<Utc>) -> i64 {
    at.timestamp().div_euclid(SECONDS_PER_DAY)
}

pub fn day_start(day: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(day * SECONDS_PER_DAY, 0)
        .ok_or_else(|| Error::DecodeDateTimeError(format!("day id {}", day)))
}

pub fn hour_of_day(at: &DateTime<Utc>) -> u32 {
    at.hour()
}

/// Parses a base-unit amount, rejecting negative values before any state
/// is touched.
pub fn parse_amount(field: &str, raw: &str) -> Result<BigDecimal, Error> {
    let value = BigDecimal::from_str(raw)?;
    if value < BigDecimal::zero() {
        return Err(Error::ValidationError(format!(
            "negative amount for {}: {}",
            field, raw
        )));
    }
    Ok(value)
}

/// Base units → whole tokens as f64, for scoring only; ledger amounts stay
/// in BigDecimal.
pub fn to_whole(value: &BigDecimal, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    value.to_f64().unwrap_or(0.0) / scale
}
