use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub id: i64,
    pub term: String,
    #[serde(default)]
    pub industry: Option<String>,
}

/// One ranked result for a tracked keyword, as returned by the backend.
/// Timestamps are naive UTC (`datetime.utcnow().isoformat()` upstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingObservation {
    pub url: String,
    pub position: u32,
    pub timestamp: NaiveDateTime,
}

impl RankingObservation {
    /// Calendar day the observation belongs to, bucketed in UTC.
    pub fn day(&self) -> chrono::NaiveDate {
        self.timestamp.date()
    }
}
