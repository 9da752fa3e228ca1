use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response of `GET /keywords/{id}/predict`. The prediction map values stay
/// raw `Value`s because the backend shape is loose; `PredictionSeries`
/// parses them tolerantly where needed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: BTreeMap<String, Value>,
    #[serde(default)]
    pub claude_analysis: Value,
    #[serde(default)]
    pub days_analyzed: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Per-URL forecast as produced by the backend predictor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionSeries {
    #[serde(default)]
    pub current_position: Option<u32>,
    #[serde(default)]
    pub trend: Option<f64>,
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub is_volatile: Option<bool>,
    #[serde(default)]
    pub predictions: Option<Vec<PredictionPoint>>,
}

impl PredictionSeries {
    /// Tolerant parse of one map value; `None` when the value is not a
    /// forecast object at all.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Last usable predicted position, in list order.
    pub fn final_rank(&self) -> Option<u32> {
        self.predictions
            .as_deref()?
            .iter()
            .rev()
            .find_map(PredictionPoint::rank)
    }

    /// First usable predicted position, in list order.
    pub fn first_rank(&self) -> Option<u32> {
        self.predictions
            .as_deref()?
            .iter()
            .find_map(PredictionPoint::rank)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionPoint {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
}

impl PredictionPoint {
    /// Calendar day of the point; tolerates a trailing time part.
    pub fn day(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?;
        let date = date.split('T').next().unwrap_or(date);
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    /// Position as a 1-based rank; non-positive values count as absent.
    pub fn rank(&self) -> Option<u32> {
        let position = self.position?;
        if position >= 1.0 {
            Some(position.round() as u32)
        } else {
            None
        }
    }
}

/// Response of `POST /keywords/{id}/content-analysis`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentAnalysisResponse {
    pub analysis: ContentReport,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentReport {
    #[serde(default)]
    pub competitiveness_score: Option<f64>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    // Returned instead of the structured fields when the backend could not
    // parse its own model output.
    #[serde(default)]
    pub raw_analysis: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentAnalysisRequest<'a> {
    pub target_url: &'a str,
    pub competitor_urls: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct NewKeyword<'a> {
    pub term: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<&'a str>,
}
