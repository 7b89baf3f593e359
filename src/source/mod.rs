//! Read-only access to the box-office data service.
//!
//! Two queries exist: the weekly ranking list for a week-ending date and the
//! per-title detail record. Both report failure as `None`; the typed reason is
//! logged where it happens and never reaches the caller.

pub mod kofic;
mod memo;

#[cfg(test)]
pub(crate) mod fixture;

pub use kofic::KoficClient;
pub use memo::Memo;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One element of `weeklyBoxOfficeList` as the service sends it.
///
/// Numeric fields are strings on the wire; they stay as raw JSON here and are
/// coerced by the row normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRankingEntry {
    pub rnum: Value,
    pub rank: Value,
    pub rank_inten: Value,
    pub rank_old_and_new: String,
    pub movie_cd: String,
    pub movie_nm: String,
    pub open_dt: String,
    pub sales_amt: Value,
    pub sales_share: Value,
    pub sales_inten: Value,
    pub sales_change: Value,
    pub sales_acc: Value,
    pub audi_cnt: Value,
    pub audi_inten: Value,
    pub audi_change: Value,
    pub audi_acc: Value,
    pub scrn_cnt: Value,
    pub show_cnt: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "peopleNm", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    #[serde(rename = "watchGradeNm", default)]
    pub watch_grade_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "companyNm", default)]
    pub name: String,
    #[serde(rename = "companyPartNm", default)]
    pub role: String,
}

/// Per-title metadata from the detail query (`movieInfoResult.movieInfo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleDetail {
    #[serde(default)]
    pub directors: Vec<Director>,
    #[serde(default)]
    pub audits: Vec<Audit>,
    #[serde(rename = "companys", default)]
    pub companies: Vec<Company>,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("api key not configured")]
    NotConfigured,
    #[error("service fault {code}: {message}")]
    Fault { code: String, message: String },
    #[error("response is missing the `{0}` envelope")]
    MissingEnvelope(&'static str),
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("network: {0}")]
    Net(#[from] reqwest::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// The two queries the pipeline needs from the data service.
#[async_trait]
pub trait BoxOfficeSource: Send + Sync {
    /// Whether a usable credential is present. When false every query is `None`.
    fn is_configured(&self) -> bool;

    async fn weekly_ranking(&self, week_end: NaiveDate) -> Option<Vec<RawRankingEntry>>;

    async fn title_detail(&self, title_code: &str) -> Option<TitleDetail>;
}
