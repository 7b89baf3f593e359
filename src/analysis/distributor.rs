use indexmap::IndexMap;
use serde::Serialize;

use crate::enrichment::EnrichedRow;

/// Number of distributors kept in the contribution view.
pub const TOP_DISTRIBUTORS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributorShare {
    pub distributor: String,
    pub weekly_audience: u64,
    /// Percentage of the weekly audience across all distributors, before truncation.
    pub share_percent: f64,
}

/// Weekly audience per distributor, largest first, top [`TOP_DISTRIBUTORS`].
///
/// Ties keep first-appearance order. With a zero grand total every share is 0.
pub fn distributor_contribution(rows: &[EnrichedRow]) -> Vec<DistributorShare> {
    let mut shares = all_distributor_shares(rows);
    shares.truncate(TOP_DISTRIBUTORS);
    shares
}

fn all_distributor_shares(rows: &[EnrichedRow]) -> Vec<DistributorShare> {
    let mut totals: IndexMap<&str, u64> = IndexMap::new();
    for r in rows {
        *totals.entry(r.distributor.as_str()).or_insert(0) += r.ranking.weekly_audience;
    }
    let grand_total: u64 = totals.values().sum();

    let mut shares: Vec<DistributorShare> = totals
        .into_iter()
        .map(|(distributor, weekly_audience)| DistributorShare {
            distributor: distributor.to_string(),
            weekly_audience,
            share_percent: if grand_total == 0 {
                0.0
            } else {
                weekly_audience as f64 / grand_total as f64 * 100.0
            },
        })
        .collect();
    shares.sort_by(|a, b| b.weekly_audience.cmp(&a.weekly_audience));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testutil::row;

    #[test]
    fn single_distributor_owns_the_whole_week() {
        let rows = vec![
            row(1, "A", 100_000, 400_000, "15세", "Dist1"),
            row(2, "B", 50_000, 50_000, "전체", "Dist1"),
        ];
        let view = distributor_contribution(&rows);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].distributor, "Dist1");
        assert_eq!(view[0].weekly_audience, 150_000);
        assert!((view[0].share_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let rows = vec![
            row(1, "A", 300, 300, "g", "Small"),
            row(2, "B", 500, 500, "g", "TieFirst"),
            row(3, "C", 500, 500, "g", "TieSecond"),
            row(4, "D", 700, 700, "g", "Small"),
        ];
        let names: Vec<String> = distributor_contribution(&rows)
            .into_iter()
            .map(|s| s.distributor)
            .collect();
        assert_eq!(names, vec!["Small", "TieFirst", "TieSecond"]);
    }

    #[test]
    fn shares_sum_to_100_before_truncation_and_at_most_100_after() {
        let rows: Vec<EnrichedRow> = (0..14u32)
            .map(|i| {
                let code = format!("T{i}");
                let dist = format!("D{i}");
                row(i + 1, &code, 1_000 * u64::from(i + 1), 50_000, "g", &dist)
            })
            .collect();

        let all: f64 = all_distributor_shares(&rows)
            .iter()
            .map(|s| s.share_percent)
            .sum();
        assert!((all - 100.0).abs() < 1e-9);

        let top = distributor_contribution(&rows);
        assert_eq!(top.len(), TOP_DISTRIBUTORS);
        assert_eq!(top[0].distributor, "D13");
        let kept: f64 = top.iter().map(|s| s.share_percent).sum();
        assert!(kept <= 100.0 + 1e-9);
        assert!(kept < 100.0);
    }

    #[test]
    fn zero_audience_week_has_zero_shares() {
        let rows = vec![row(1, "A", 0, 0, "g", "Dist1")];
        let view = distributor_contribution(&rows);
        assert_eq!(view[0].share_percent, 0.0);
    }
}
