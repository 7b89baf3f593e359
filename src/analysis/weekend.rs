//! Weekend dependency: weekly audience as a share of cumulative audience.
//!
//! The service exposes no daily breakdown, so a high ratio is read as
//! "most of the run's audience came this week" (event-style opening) and a low
//! one as a long word-of-mouth run. It is a proxy, not a weekend count.

use serde::Serialize;

use crate::enrichment::EnrichedRow;

/// Rows per slice.
pub const WEEKEND_SLICE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekendDependencyRow {
    pub title_name: String,
    pub weekly_audience: u64,
    pub cumulative_audience: u64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekendDependency {
    /// Highest ratios, descending.
    pub highest: Vec<WeekendDependencyRow>,
    /// Lowest ratios, ascending.
    pub lowest: Vec<WeekendDependencyRow>,
}

/// Top and bottom [`WEEKEND_SLICE`] rows by ratio. Rows without a defined
/// ratio (cumulative audience 0) appear in neither slice.
pub fn weekend_dependency(rows: &[EnrichedRow]) -> WeekendDependency {
    let mut defined: Vec<WeekendDependencyRow> = rows
        .iter()
        .filter_map(|r| {
            let ratio = r.weekend_dependency_ratio.filter(|x| x.is_finite())?;
            Some(WeekendDependencyRow {
                title_name: r.ranking.title_name.clone(),
                weekly_audience: r.ranking.weekly_audience,
                cumulative_audience: r.ranking.cumulative_audience,
                ratio,
            })
        })
        .collect();

    defined.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    let highest: Vec<_> = defined.iter().take(WEEKEND_SLICE).cloned().collect();

    defined.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
    defined.truncate(WEEKEND_SLICE);

    WeekendDependency {
        highest,
        lowest: defined,
    }
}
