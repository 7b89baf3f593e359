use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use super::{Audit, BoxOfficeSource, Company, Director, RawRankingEntry, TitleDetail};

/// In-memory source for pipeline tests; records every detail lookup.
#[derive(Default)]
pub(crate) struct FakeSource {
    pub configured: bool,
    pub ranking: Option<Vec<RawRankingEntry>>,
    pub details: HashMap<String, TitleDetail>,
    pub detail_calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(ranking: Vec<RawRankingEntry>) -> Self {
        Self {
            configured: true,
            ranking: Some(ranking),
            ..Default::default()
        }
    }

    pub fn with_detail(mut self, code: &str, detail: TitleDetail) -> Self {
        self.details.insert(code.to_string(), detail);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BoxOfficeSource for FakeSource {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn weekly_ranking(&self, _week_end: NaiveDate) -> Option<Vec<RawRankingEntry>> {
        if !self.configured {
            return None;
        }
        self.ranking.clone()
    }

    async fn title_detail(&self, title_code: &str) -> Option<TitleDetail> {
        if !self.configured {
            return None;
        }
        self.detail_calls.lock().unwrap().push(title_code.to_string());
        self.details.get(title_code).cloned()
    }
}

/// Wire-shaped ranking entry with string-encoded numbers.
pub(crate) fn entry(rank: u32, code: &str, weekly: u64, cumulative: u64) -> RawRankingEntry {
    RawRankingEntry {
        rank: json!(rank.to_string()),
        movie_cd: code.to_string(),
        movie_nm: format!("영화 {code}"),
        open_dt: "2024-02-22".to_string(),
        audi_cnt: json!(weekly.to_string()),
        audi_acc: json!(cumulative.to_string()),
        sales_amt: json!((weekly * 10_000).to_string()),
        sales_acc: json!((cumulative * 10_000).to_string()),
        ..Default::default()
    }
}

pub(crate) fn detail(director: &str, grade: &str, distributor: &str) -> TitleDetail {
    TitleDetail {
        directors: vec![Director {
            name: director.to_string(),
        }],
        audits: vec![Audit {
            watch_grade_name: grade.to_string(),
        }],
        companies: vec![
            Company {
                name: "제작사 A".to_string(),
                role: "제작사".to_string(),
            },
            Company {
                name: distributor.to_string(),
                role: crate::enrichment::DISTRIBUTOR_ROLE.to_string(),
            },
        ],
    }
}
