use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One chart line: positions index-aligned to the owning set's date axis.
/// `None` marks a day with no observation; nothing is interpolated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySeries {
    pub url: String,
    pub label: String,
    pub positions: Vec<Option<u32>>,
}

/// A date-indexed multi-series structure where every series shares one
/// ascending, duplicate-free date axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignedSeriesSet {
    pub dates: Vec<NaiveDate>,
    pub series: Vec<EntitySeries>,
}

impl AlignedSeriesSet {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Alignment invariant: every series has exactly one slot per axis date.
    pub fn is_aligned(&self) -> bool {
        self.series
            .iter()
            .all(|s| s.positions.len() == self.dates.len())
    }
}
