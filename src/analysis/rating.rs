use indexmap::IndexMap;
use serde::Serialize;

use crate::enrichment::EnrichedRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingImpact {
    pub watch_grade: String,
    pub total_audience: u64,
    pub mean_audience: f64,
    pub title_count: usize,
}

/// Weekly audience sum / mean / count per age rating, highest mean first.
pub fn rating_impact(rows: &[EnrichedRow]) -> Vec<RatingImpact> {
    let mut groups: IndexMap<&str, (u64, usize)> = IndexMap::new();
    for r in rows {
        let g = groups.entry(r.watch_grade.as_str()).or_insert((0, 0));
        g.0 += r.ranking.weekly_audience;
        g.1 += 1;
    }

    let mut out: Vec<RatingImpact> = groups
        .into_iter()
        .map(|(grade, (total, count))| RatingImpact {
            watch_grade: grade.to_string(),
            total_audience: total,
            mean_audience: total as f64 / count as f64,
            title_count: count,
        })
        .collect();
    out.sort_by(|a, b| b.mean_audience.total_cmp(&a.mean_audience));
    out
}
