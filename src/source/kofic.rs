use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{BoxOfficeSource, Memo, RawRankingEntry, SourceError, TitleDetail};
use crate::config::SourceConfig;
use crate::week::target_dt;

/// Weekly mode for `weekGb`: Monday..Sunday.
const WEEK_GROUP_WEEKLY: &str = "0";

fn truncate_for_log(mut s: String, max_len: usize) -> String {
    if s.len() > max_len {
        let mut cut = max_len;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push('…');
    }
    s
}

/// KOFIC (Korean Film Council) open API client.
///
/// Endpoints:
/// - GET searchWeeklyBoxOfficeList.json?key=..&targetDt=YYYYMMDD&weekGb=0
/// - GET searchMovieInfo.json?key=..&movieCd=..
///
/// Successful responses are memoized per exact parameter for the lifetime of
/// the client; failures are not, so the next call re-queries.
#[derive(Debug, Clone)]
pub struct KoficClient {
    cfg: SourceConfig,
    http: Client,
    rankings: Memo<String, Vec<RawRankingEntry>>,
    details: Memo<String, TitleDetail>,
}

impl KoficClient {
    pub fn new(cfg: SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("boxoffice-explorer/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        if !cfg.is_configured() {
            warn!("KOFIC api key not configured; all queries will return no data");
        }
        Ok(Self {
            cfg,
            http,
            rankings: Memo::default(),
            details: Memo::default(),
        })
    }

    /// Fallible form of the ranking query, for callers that want the reason.
    pub async fn try_weekly_ranking(
        &self,
        week_end: NaiveDate,
    ) -> Result<Vec<RawRankingEntry>, SourceError> {
        let key = self.cfg.api_key().ok_or(SourceError::NotConfigured)?;
        let target = target_dt(week_end);
        if let Some(hit) = self.rankings.get(&target) {
            debug!(target_dt = %target, rows = hit.len(), "weekly ranking memo hit");
            return Ok(hit);
        }

        let req = self.http.get(self.cfg.boxoffice_url.clone()).query(&[
            ("key", key),
            ("targetDt", target.as_str()),
            ("weekGb", WEEK_GROUP_WEEKLY),
        ]);
        let body = self.get_json(req).await?;
        let entries = parse_weekly_ranking(body)?;
        info!(target_dt = %target, rows = entries.len(), "weekly ranking fetched");
        self.rankings.insert(target, entries.clone());
        Ok(entries)
    }

    /// Fallible form of the detail query.
    pub async fn try_title_detail(&self, title_code: &str) -> Result<TitleDetail, SourceError> {
        let key = self.cfg.api_key().ok_or(SourceError::NotConfigured)?;
        if let Some(hit) = self.details.get(&title_code.to_string()) {
            debug!(title_code, "title detail memo hit");
            return Ok(hit);
        }

        let req = self
            .http
            .get(self.cfg.detail_url.clone())
            .query(&[("key", key), ("movieCd", title_code)]);
        let body = self.get_json(req).await?;
        let detail = parse_title_detail(body)?;
        debug!(
            title_code,
            directors = detail.directors.len(),
            audits = detail.audits.len(),
            companies = detail.companies.len(),
            "title detail fetched"
        );
        self.details.insert(title_code.to_string(), detail.clone());
        Ok(detail)
    }

    async fn get_json(&self, req: reqwest::RequestBuilder) -> Result<Value, SourceError> {
        let resp = req.header("Accept", "application/json").send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                body: truncate_for_log(text, 500),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl BoxOfficeSource for KoficClient {
    fn is_configured(&self) -> bool {
        self.cfg.is_configured()
    }

    async fn weekly_ranking(&self, week_end: NaiveDate) -> Option<Vec<RawRankingEntry>> {
        match self.try_weekly_ranking(week_end).await {
            Ok(entries) => Some(entries),
            Err(SourceError::NotConfigured) => None,
            Err(err) => {
                warn!(error = %err, week_end = %week_end, "weekly ranking unavailable");
                None
            }
        }
    }

    async fn title_detail(&self, title_code: &str) -> Option<TitleDetail> {
        match self.try_title_detail(title_code).await {
            Ok(detail) => Some(detail),
            Err(SourceError::NotConfigured) => None,
            Err(err) => {
                warn!(error = %err, title_code, "title detail unavailable");
                None
            }
        }
    }
}

fn fault_of(body: &Value) -> Option<SourceError> {
    let fault = body.get("faultInfo")?;
    let text = |k: &str| {
        fault
            .get(k)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(SourceError::Fault {
        code: text("errorCode"),
        message: text("message"),
    })
}

/// Extract `boxOfficeResult.weeklyBoxOfficeList` or the service fault.
pub fn parse_weekly_ranking(mut body: Value) -> Result<Vec<RawRankingEntry>, SourceError> {
    if let Some(fault) = fault_of(&body) {
        return Err(fault);
    }
    let list = body
        .get_mut("boxOfficeResult")
        .and_then(|r| r.get_mut("weeklyBoxOfficeList"))
        .map(Value::take)
        .ok_or(SourceError::MissingEnvelope(
            "boxOfficeResult.weeklyBoxOfficeList",
        ))?;
    Ok(serde_json::from_value(list)?)
}

/// Extract `movieInfoResult.movieInfo` or the service fault.
pub fn parse_title_detail(mut body: Value) -> Result<TitleDetail, SourceError> {
    if let Some(fault) = fault_of(&body) {
        return Err(fault);
    }
    let info = body
        .get_mut("movieInfoResult")
        .and_then(|r| r.get_mut("movieInfo"))
        .map(Value::take)
        .ok_or(SourceError::MissingEnvelope("movieInfoResult.movieInfo"))?;
    Ok(serde_json::from_value(info)?)
}
