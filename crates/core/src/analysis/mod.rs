pub mod json;
pub mod normalize;

pub use normalize::normalize_analysis;

/// One line of an enumerated list. `heading` may be empty (plain items);
/// `nested` carries one more level of enumeration (category groups).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bullet {
    pub heading: String,
    pub text: String,
    pub nested: Vec<Bullet>,
}

impl Bullet {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            heading: String::new(),
            text: text.into(),
            nested: Vec::new(),
        }
    }
}

/// Canonical shape of one analysis field after normalization: free text or an
/// enumerable list, never the backend's raw string/list/map zoo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Text(String),
    Bullets(Vec<Bullet>),
}

/// Normalized view of the backend's free-form insight payload. A field is
/// `None` when the backend omitted it or sent it empty.
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    pub summary: Option<SectionBody>,
    pub volatility: Option<SectionBody>,
    pub prediction: Option<SectionBody>,
    pub patterns: Option<SectionBody>,
    pub recommendations: Option<SectionBody>,
}

impl AnalysisReport {
    /// "No analysis available" check: true when no recognized field survived.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.volatility.is_none()
            && self.prediction.is_none()
            && self.patterns.is_none()
            && self.recommendations.is_none()
    }
}
