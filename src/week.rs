//! Week-ending date selection.
//!
//! Weekly rankings run Monday..Sunday and are keyed by the Sunday. Only
//! completed weeks can be queried.

use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, Duration, NaiveDate};

/// Most recent Sunday at or before `today`.
pub fn latest_week_end(today: NaiveDate) -> NaiveDate {
    let back = today.weekday().num_days_from_sunday();
    today - Duration::days(i64::from(back))
}

/// The week before [`latest_week_end`]; its figures are settled.
pub fn default_week_end(today: NaiveDate) -> NaiveDate {
    latest_week_end(today) - Duration::days(7)
}

/// Use `requested` if it is not after the latest selectable week end, else fail.
/// `None` picks [`default_week_end`].
pub fn resolve_week_end(requested: Option<NaiveDate>, today: NaiveDate) -> Result<NaiveDate> {
    let latest = latest_week_end(today);
    match requested {
        None => Ok(default_week_end(today)),
        Some(date) if date > latest => bail!(
            "week ending {date} is not complete yet; latest selectable week ends {latest}"
        ),
        Some(date) => Ok(date),
    }
}

/// `YYYY-MM-DD` or `YYYYMMDD`.
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .map_err(|_| anyhow!("invalid date {raw:?}; expected YYYY-MM-DD or YYYYMMDD"))
}

/// Query-string form of a date: `YYYYMMDD`.
pub fn target_dt(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
