use serde::Serialize;
use serde_json::Value;

use super::format::{with_unit, PERSONS, WON};
use crate::source::RawRankingEntry;

/// Marker the service puts in `rankOldAndNew` for a title entering the chart.
const NEW_ENTRY_MARKER: &str = "NEW";

/// One ranking entry with typed numbers and pre-formatted display strings.
///
/// The `*_display` field names are part of the contract with the report layer,
/// which selects them by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub rank: u32,
    pub title_name: String,
    pub title_code: String,
    pub open_date: String,
    pub weekly_audience: u64,
    pub cumulative_audience: u64,
    pub weekly_revenue: u64,
    pub cumulative_revenue: u64,
    /// Share of the week's total revenue, in percent.
    pub sales_share: f64,
    /// Places gained (positive) or lost since last week.
    pub rank_change: i64,
    pub is_new_entry: bool,
    pub weekly_audience_display: String,
    pub cumulative_audience_display: String,
    pub weekly_revenue_display: String,
    pub cumulative_revenue_display: String,
}

impl RankingRow {
    /// Weekly ÷ cumulative audience × 100; `None` when the cumulative count is 0.
    pub fn weekend_dependency_ratio(&self) -> Option<f64> {
        if self.cumulative_audience == 0 {
            return None;
        }
        Some(self.weekly_audience as f64 / self.cumulative_audience as f64 * 100.0)
    }
}

/// Convert raw ranking entries into rows. Never drops or reorders a row.
pub fn normalize(entries: &[RawRankingEntry]) -> Vec<RankingRow> {
    entries.iter().map(normalize_entry).collect()
}

fn normalize_entry(e: &RawRankingEntry) -> RankingRow {
    let weekly_audience = coerce_count(&e.audi_cnt);
    let cumulative_audience = coerce_count(&e.audi_acc);
    let weekly_revenue = coerce_count(&e.sales_amt);
    let cumulative_revenue = coerce_count(&e.sales_acc);

    RankingRow {
        rank: u32::try_from(coerce_count(&e.rank)).unwrap_or(0),
        title_name: e.movie_nm.trim().to_string(),
        title_code: e.movie_cd.trim().to_string(),
        open_date: e.open_dt.trim().to_string(),
        weekly_audience,
        cumulative_audience,
        weekly_revenue,
        cumulative_revenue,
        sales_share: coerce_share(&e.sales_share),
        rank_change: coerce_signed(&e.rank_inten),
        is_new_entry: e.rank_old_and_new.trim().eq_ignore_ascii_case(NEW_ENTRY_MARKER),
        weekly_audience_display: with_unit(weekly_audience, PERSONS),
        cumulative_audience_display: with_unit(cumulative_audience, PERSONS),
        weekly_revenue_display: with_unit(weekly_revenue, WON),
        cumulative_revenue_display: with_unit(cumulative_revenue, WON),
    }
}

/// Non-negative whole number from a JSON number or numeric string; 0 otherwise.
pub fn coerce_count(v: &Value) -> u64 {
    match v {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => strip_separators(s).parse::<u64>().ok(),
        _ => None,
    }
    .unwrap_or(0)
}

fn coerce_signed(v: &Value) -> i64 {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => strip_separators(s).parse::<i64>().ok(),
        _ => None,
    }
    .unwrap_or(0)
}

fn coerce_share(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => strip_separators(s).parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite() && *f >= 0.0)
    .unwrap_or(0.0)
}

fn strip_separators(s: &str) -> String {
    s.trim().chars().filter(|c| *c != ',').collect()
}
