use crate::backend::types::{
    ContentAnalysisRequest, ContentAnalysisResponse, NewKeyword, PredictResponse,
};
use crate::backend::RankingBackend;
use crate::config::Settings;
use crate::domain::keyword::{Keyword, RankingObservation};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the external ranking backend (`/api` base path).
///
/// Failed requests are surfaced to the caller as-is: the user re-triggers the
/// action manually, there is no automatic retry.
#[derive(Debug, Clone)]
pub struct HttpRankingBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRankingBackend {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_api_base_url()?.to_string();

        let timeout_secs = std::env::var("RANKFLUX_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build backend http client")?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Checks the status, then parses the body. A non-success status is an
    /// error regardless of body shape; the body's `message`/`error` fields are
    /// included when they happen to exist.
    async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T> {
        let status = res.status();
        let text = res.text().await.context("failed to read backend response")?;

        if !status.is_success() {
            tracing::warn!(%status, "backend returned an error status");
            anyhow::bail!(error_from_body(status, &text));
        }

        serde_json::from_str::<T>(&text)
            .with_context(|| format!("backend response is not valid JSON: {text}"))
    }

    async fn check_status(res: reqwest::Response) -> Result<()> {
        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        let text = res.text().await.unwrap_or_default();
        anyhow::bail!(error_from_body(status, &text));
    }
}

fn error_from_body(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("message")
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    match detail {
        Some(msg) => format!("backend HTTP {status}: {msg}"),
        None => format!("backend HTTP {status}"),
    }
}

#[async_trait::async_trait]
impl RankingBackend for HttpRankingBackend {
    async fn keywords(&self) -> Result<Vec<Keyword>> {
        let res = self
            .http
            .get(self.url("/keywords"))
            .send()
            .await
            .context("keywords request failed")?;
        Self::read_json(res).await
    }

    async fn add_keyword(&self, term: &str, industry: Option<&str>) -> Result<Keyword> {
        let res = self
            .http
            .post(self.url("/keywords"))
            .json(&NewKeyword { term, industry })
            .send()
            .await
            .context("add keyword request failed")?;
        Self::read_json(res).await
    }

    async fn rankings(&self, keyword_id: i64, days: u32) -> Result<Vec<RankingObservation>> {
        let res = self
            .http
            .get(self.url(&format!("/keywords/{keyword_id}/rankings")))
            .query(&[("days", days.to_string())])
            .send()
            .await
            .context("rankings request failed")?;
        Self::read_json(res).await
    }

    async fn refresh_rankings(&self, keyword_id: i64) -> Result<()> {
        let res = self
            .http
            .post(self.url(&format!("/keywords/{keyword_id}/fetch")))
            .send()
            .await
            .context("ranking refresh request failed")?;
        Self::check_status(res).await
    }

    async fn predict(&self, keyword_id: i64) -> Result<PredictResponse> {
        let res = self
            .http
            .get(self.url(&format!("/keywords/{keyword_id}/predict")))
            .send()
            .await
            .context("predict request failed")?;
        Self::read_json(res).await
    }

    async fn analyze_content(
        &self,
        keyword_id: i64,
        target_url: &str,
        competitor_urls: &[String],
    ) -> Result<ContentAnalysisResponse> {
        let res = self
            .http
            .post(self.url(&format!("/keywords/{keyword_id}/content-analysis")))
            .json(&ContentAnalysisRequest {
                target_url,
                competitor_urls,
            })
            .send()
            .await
            .context("content analysis request failed")?;
        Self::read_json(res).await
    }
}
