use crate::domain::keyword::RankingObservation;
use crate::domain::series::{AlignedSeriesSet, EntitySeries};
use crate::series::label::display_label;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Chart readability cap: only the first N distinct URLs encountered get a series.
pub const MAX_RANKING_SERIES: usize = 10;

/// Reshape a flat list of ranking observations into per-URL series aligned on
/// a shared calendar-day axis (UTC bucketing).
///
/// Days with no observation for a URL stay `None`; two observations for the
/// same URL on the same day resolve last-write-wins in input order. Empty
/// input yields an empty set, not an error.
pub fn align_rankings(observations: &[RankingObservation]) -> AlignedSeriesSet {
    let mut entity_order: Vec<&str> = Vec::new();
    let mut by_entity: HashMap<&str, HashMap<NaiveDate, u32>> = HashMap::new();
    let mut axis: BTreeSet<NaiveDate> = BTreeSet::new();

    for obs in observations {
        let day = obs.day();
        axis.insert(day);

        let per_day = by_entity.entry(obs.url.as_str()).or_insert_with(|| {
            entity_order.push(obs.url.as_str());
            HashMap::new()
        });
        // Later observations for the same day overwrite earlier ones.
        per_day.insert(day, obs.position);
    }

    let dates: Vec<NaiveDate> = axis.into_iter().collect();

    let series = entity_order
        .into_iter()
        .take(MAX_RANKING_SERIES)
        .map(|url| {
            let per_day = by_entity.remove(url).unwrap_or_default();
            EntitySeries {
                url: url.to_string(),
                label: display_label(url),
                positions: dates.iter().map(|d| per_day.get(d).copied()).collect(),
            }
        })
        .collect();

    AlignedSeriesSet { dates, series }
}
