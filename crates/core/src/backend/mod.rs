pub mod http;
pub mod types;

use crate::domain::keyword::{Keyword, RankingObservation};
use anyhow::Result;
use self::types::{ContentAnalysisResponse, PredictResponse};

/// Seam over the external ranking backend. Everything the dashboard shows
/// comes through here; there is no local persistence.
#[async_trait::async_trait]
pub trait RankingBackend: Send + Sync {
    async fn keywords(&self) -> Result<Vec<Keyword>>;

    async fn add_keyword(&self, term: &str, industry: Option<&str>) -> Result<Keyword>;

    async fn rankings(&self, keyword_id: i64, days: u32) -> Result<Vec<RankingObservation>>;

    /// Triggers a fresh ranking collection on the backend. The response body
    /// is unspecified and unused beyond success.
    async fn refresh_rankings(&self, keyword_id: i64) -> Result<()>;

    async fn predict(&self, keyword_id: i64) -> Result<PredictResponse>;

    async fn analyze_content(
        &self,
        keyword_id: i64,
        target_url: &str,
        competitor_urls: &[String],
    ) -> Result<ContentAnalysisResponse>;
}
