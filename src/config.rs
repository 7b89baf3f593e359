use anyhow::{Context, Result};
use url::Url;

use crate::util::env as env_util;

/// Placeholder shipped in sample configuration; treated the same as a missing key.
pub const API_KEY_PLACEHOLDER: &str = "여기에_당신의_KOFIC_API_키를_직접_입력하세요";

pub const DEFAULT_BOXOFFICE_URL: &str =
    "http://www.kobis.or.kr/kobisopenapi/webservice/rest/boxoffice/searchWeeklyBoxOfficeList.json";
pub const DEFAULT_DETAIL_URL: &str =
    "http://www.kobis.or.kr/kobisopenapi/webservice/rest/movie/searchMovieInfo.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Keys read by [`SourceConfig::from_env`], in snapshot order.
pub const ENV_KEYS: [&str; 4] = [
    "KOFIC_API_KEY",
    "KOFIC_BOXOFFICE_URL",
    "KOFIC_DETAIL_URL",
    "KOFIC_TIMEOUT_SECS",
];

/// Connection settings for the KOFIC open API.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub api_key: Option<String>,
    pub boxoffice_url: Url,
    pub detail_url: Url,
    pub timeout_secs: u64,
}

impl SourceConfig {
    /// Default endpoints and timeout with the given key.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.map(|k| k.trim().to_string()),
            boxoffice_url: Url::parse(DEFAULT_BOXOFFICE_URL)
                .context("parsing default boxoffice url")?,
            detail_url: Url::parse(DEFAULT_DETAIL_URL).context("parsing default detail url")?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Build from `.env` / process environment. Endpoint overrides must be valid URLs.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::new(env_util::env_opt("KOFIC_API_KEY"))?;
        if let Some(raw) = env_util::env_opt("KOFIC_BOXOFFICE_URL") {
            cfg.boxoffice_url = Url::parse(raw.trim())
                .with_context(|| format!("KOFIC_BOXOFFICE_URL is not a valid url: {raw}"))?;
        }
        if let Some(raw) = env_util::env_opt("KOFIC_DETAIL_URL") {
            cfg.detail_url = Url::parse(raw.trim())
                .with_context(|| format!("KOFIC_DETAIL_URL is not a valid url: {raw}"))?;
        }
        cfg.timeout_secs = env_util::env_parse("KOFIC_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        Ok(cfg)
    }

    pub fn with_endpoints(mut self, boxoffice_url: Url, detail_url: Url) -> Self {
        self.boxoffice_url = boxoffice_url;
        self.detail_url = detail_url;
        self
    }

    /// The usable key, or `None` when unset, blank, or still the placeholder.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty() && *k != API_KEY_PLACEHOLDER)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
