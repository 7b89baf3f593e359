//! Left-join of per-title detail onto ranking rows.
//!
//! One detail query per distinct title code, issued sequentially in order of
//! first appearance. A missing detail never drops a row; the affected fields
//! fall back to [`UNKNOWN`].

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info};

use crate::normalization::RankingRow;
use crate::source::{BoxOfficeSource, TitleDetail};

/// Placeholder for a detail field the service did not provide.
pub const UNKNOWN: &str = "정보 없음";

/// `companyPartNm` value that marks the distributing company.
pub const DISTRIBUTOR_ROLE: &str = "배급사";

/// A ranking row joined with its title detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRow {
    #[serde(flatten)]
    pub ranking: RankingRow,
    pub director: String,
    pub watch_grade: String,
    pub distributor: String,
    /// Heuristic proxy: weekly ÷ cumulative audience × 100. The service has no
    /// daily breakdown, so this is not a literal weekend measurement.
    pub weekend_dependency_ratio: Option<f64>,
}

/// Progress after each detail lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentProgress {
    pub processed: usize,
    pub total: usize,
}

impl EnrichmentProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// The three fields taken from a title detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields {
    pub director: String,
    pub watch_grade: String,
    pub distributor: String,
}

impl DetailFields {
    pub fn unknown() -> Self {
        Self {
            director: UNKNOWN.to_string(),
            watch_grade: UNKNOWN.to_string(),
            distributor: UNKNOWN.to_string(),
        }
    }

    /// First director, first age rating, first company in the distributor role.
    pub fn from_detail(detail: &TitleDetail) -> Self {
        let director = detail
            .directors
            .first()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let watch_grade = detail
            .audits
            .first()
            .map(|a| a.watch_grade_name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let distributor = detail
            .companies
            .iter()
            .find(|c| c.role == DISTRIBUTOR_ROLE)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            director,
            watch_grade,
            distributor,
        }
    }
}

/// Distinct title codes in order of first appearance.
pub fn distinct_title_codes(rows: &[RankingRow]) -> IndexSet<&str> {
    rows.iter().map(|r| r.title_code.as_str()).collect()
}

/// Fetch detail for every distinct title and join it onto `rows`.
///
/// `on_progress` runs after each lookup and has no effect on the result.
pub async fn enrich<S, F>(source: &S, rows: &[RankingRow], mut on_progress: F) -> Vec<EnrichedRow>
where
    S: BoxOfficeSource + ?Sized,
    F: FnMut(EnrichmentProgress),
{
    let codes = distinct_title_codes(rows);
    let total = codes.len();
    let mut fields: HashMap<&str, DetailFields> = HashMap::with_capacity(total);

    for (i, code) in codes.into_iter().enumerate() {
        let extracted = match source.title_detail(code).await {
            Some(detail) => DetailFields::from_detail(&detail),
            None => {
                debug!(title_code = code, "no detail; using placeholders");
                DetailFields::unknown()
            }
        };
        fields.insert(code, extracted);
        on_progress(EnrichmentProgress {
            processed: i + 1,
            total,
        });
    }
    info!(titles = total, rows = rows.len(), "enrichment complete");

    rows.iter()
        .map(|row| {
            let f = fields
                .get(row.title_code.as_str())
                .cloned()
                .unwrap_or_else(DetailFields::unknown);
            EnrichedRow {
                weekend_dependency_ratio: row.weekend_dependency_ratio(),
                ranking: row.clone(),
                director: f.director,
                watch_grade: f.watch_grade,
                distributor: f.distributor,
            }
        })
        .collect()
}
