use std::fmt;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::analysis::{
    distributor_contribution, ranking_view, rating_impact, weekend_dependency,
    weekly_audience_series, DistributorShare, RankingViewRow, RatingImpact, WeekendDependency,
};
use crate::enrichment::{enrich, EnrichedRow, EnrichmentProgress};
use crate::normalization::normalize;
use crate::source::BoxOfficeSource;
use crate::week::target_dt;

/// Enriched table for one week; the views are computed on demand.
#[derive(Debug, Clone)]
pub struct WeekReport {
    pub week_end: NaiveDate,
    pub rows: Vec<EnrichedRow>,
}

impl WeekReport {
    pub fn ranking(&self) -> Vec<RankingViewRow> {
        ranking_view(&self.rows)
    }

    pub fn audience_series(&self) -> Vec<(String, u64)> {
        weekly_audience_series(&self.rows)
    }

    pub fn distributors(&self) -> Vec<DistributorShare> {
        distributor_contribution(&self.rows)
    }

    pub fn ratings(&self) -> Vec<RatingImpact> {
        rating_impact(&self.rows)
    }

    pub fn weekend(&self) -> WeekendDependency {
        weekend_dependency(&self.rows)
    }
}

/// Outcome of loading one week.
#[derive(Debug, Clone)]
pub enum LoadStatus {
    NotConfigured,
    NoData { week_end: NaiveDate },
    Loaded(WeekReport),
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::NotConfigured => write!(
                f,
                "KOFIC API key is not configured; set KOFIC_API_KEY before loading data"
            ),
            LoadStatus::NoData { week_end } => write!(
                f,
                "no box-office data for the week ending {} ({}); check the date or the API key",
                week_end.format("%Y-%m-%d"),
                target_dt(*week_end)
            ),
            LoadStatus::Loaded(report) => write!(
                f,
                "loaded box-office data for the week ending {} ({} titles)",
                report.week_end.format("%Y-%m-%d"),
                report.rows.len()
            ),
        }
    }
}

/// Fetch, normalize and enrich one week.
///
/// The credential is checked before any query; an absent or empty ranking
/// list is reported as [`LoadStatus::NoData`].
pub async fn load_week<S, F>(source: &S, week_end: NaiveDate, on_progress: F) -> LoadStatus
where
    S: BoxOfficeSource + ?Sized,
    F: FnMut(EnrichmentProgress),
{
    if !source.is_configured() {
        warn!("skipping load: api key not configured");
        return LoadStatus::NotConfigured;
    }

    let raw = match source.weekly_ranking(week_end).await {
        Some(raw) if !raw.is_empty() => raw,
        _ => return LoadStatus::NoData { week_end },
    };
    let rows = normalize(&raw);
    info!(week_end = %week_end, rows = rows.len(), "ranking normalized");

    let rows = enrich(source, &rows, on_progress).await;
    LoadStatus::Loaded(WeekReport { week_end, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::UNKNOWN;
    use crate::source::fixture::{detail, entry, FakeSource};

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
    }

    #[tokio::test]
    async fn two_title_week_end_to_end() {
        let source = FakeSource::new(vec![
            entry(1, "A", 100_000, 400_000),
            entry(2, "B", 50_000, 50_000),
        ])
        .with_detail("A", detail("감독A", "15세이상관람가", "Dist1"))
        .with_detail("B", detail("감독B", "전체관람가", "Dist1"));

        let mut last = None;
        let status = load_week(&source, week(), |p| last = Some(p)).await;
        let report = match status {
            LoadStatus::Loaded(report) => report,
            other => panic!("unexpected status: {other}"),
        };
        assert_eq!(last, Some(EnrichmentProgress { processed: 2, total: 2 }));

        assert_eq!(report.rows[0].weekend_dependency_ratio, Some(25.0));
        assert_eq!(report.rows[1].weekend_dependency_ratio, Some(100.0));

        let dist = report.distributors();
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].distributor, "Dist1");
        assert_eq!(dist[0].weekly_audience, 150_000);
        assert!((dist[0].share_percent - 100.0).abs() < 1e-9);

        assert_eq!(report.ranking()[0].weekly_audience, "100,000 명");
        assert_eq!(report.ratings()[0].watch_grade, "15세이상관람가");
        assert_eq!(report.weekend().highest[0].ratio, 100.0);
        assert_eq!(report.audience_series().len(), 2);
    }

    #[tokio::test]
    async fn unconfigured_source_is_reported_before_any_query() {
        let mut source = FakeSource::new(vec![entry(1, "A", 1, 1)]);
        source.configured = false;
        let status = load_week(&source, week(), |_| {}).await;
        assert!(matches!(status, LoadStatus::NotConfigured));
        assert!(source.calls().is_empty());
        assert!(status.to_string().contains("KOFIC_API_KEY"));
    }

    #[tokio::test]
    async fn missing_or_empty_ranking_is_no_data() {
        let mut missing = FakeSource::new(vec![]);
        missing.ranking = None;
        let status = load_week(&missing, week(), |_| {}).await;
        assert!(matches!(status, LoadStatus::NoData { .. }));
        assert!(status.to_string().contains("20240303"));

        let empty = FakeSource::new(vec![]);
        assert!(matches!(
            load_week(&empty, week(), |_| {}).await,
            LoadStatus::NoData { .. }
        ));
    }

    #[tokio::test]
    async fn detail_failures_stay_local() {
        let source = FakeSource::new(vec![entry(1, "A", 10, 20), entry(2, "B", 5, 5)])
            .with_detail("B", detail("감독B", "전체관람가", "배급B"));
        let LoadStatus::Loaded(report) = load_week(&source, week(), |_| {}).await else {
            panic!("expected loaded report");
        };
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].distributor, UNKNOWN);
        assert_eq!(report.rows[1].distributor, "배급B");
        let names: Vec<String> = report.distributors().into_iter().map(|d| d.distributor).collect();
        assert_eq!(names, vec![UNKNOWN.to_string(), "배급B".to_string()]);
    }
}
