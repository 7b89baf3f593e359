//! The four views derived from an enriched week table.
//!
//! Each view is a pure function of `&[EnrichedRow]` and returns an empty result
//! for an empty table.

pub mod distributor;
pub mod rating;
pub mod weekend;

pub use distributor::{distributor_contribution, DistributorShare, TOP_DISTRIBUTORS};
pub use rating::{rating_impact, RatingImpact};
pub use weekend::{weekend_dependency, WeekendDependency, WeekendDependencyRow, WEEKEND_SLICE};

use serde::Serialize;

use crate::enrichment::EnrichedRow;
use crate::normalization::format::{percent, rank_change_label};

/// Display columns of the ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingViewRow {
    pub rank: u32,
    /// `NEW`, `▲n`, `▼n` or `-`.
    pub rank_change: String,
    pub title_name: String,
    pub open_date: String,
    pub weekly_audience: String,
    pub cumulative_audience: String,
    pub weekly_revenue: String,
    /// Share of the week's revenue, e.g. `"45.60%"`.
    pub sales_share: String,
    pub cumulative_revenue: String,
}

/// Ranking table in source (rank) order.
pub fn ranking_view(rows: &[EnrichedRow]) -> Vec<RankingViewRow> {
    rows.iter()
        .map(|r| {
            let row = &r.ranking;
            RankingViewRow {
                rank: row.rank,
                rank_change: rank_change_label(row.rank_change, row.is_new_entry),
                title_name: row.title_name.clone(),
                open_date: row.open_date.clone(),
                weekly_audience: row.weekly_audience_display.clone(),
                cumulative_audience: row.cumulative_audience_display.clone(),
                weekly_revenue: row.weekly_revenue_display.clone(),
                sales_share: percent(row.sales_share),
                cumulative_revenue: row.cumulative_revenue_display.clone(),
            }
        })
        .collect()
}

/// `(title, weekly audience)` pairs for the weekly audience bar chart.
pub fn weekly_audience_series(rows: &[EnrichedRow]) -> Vec<(String, u64)> {
    rows.iter()
        .map(|r| (r.ranking.title_name.clone(), r.ranking.weekly_audience))
        .collect()
}
