use crate::backend::types::PredictionSeries;
use crate::domain::series::{AlignedSeriesSet, EntitySeries};
use crate::series::label::display_label;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Reshape the backend's per-URL forecast map into an aligned series set.
///
/// The axis is built only from dates actually present in some URL's prediction
/// list. Entries whose value lacks a usable `predictions` array are skipped,
/// as are individual points without a parseable date or a positive position.
/// Unlike the ranking normalizer there is no entity cap; the predictor already
/// bounds its own output.
pub fn align_predictions(predictions: &BTreeMap<String, Value>) -> AlignedSeriesSet {
    let mut axis: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut parsed: Vec<(&str, HashMap<NaiveDate, u32>)> = Vec::new();

    for (url, value) in predictions {
        let Some(series) = PredictionSeries::from_value(value) else {
            continue;
        };
        let Some(points) = series.predictions else {
            continue;
        };

        let mut per_day: HashMap<NaiveDate, u32> = HashMap::new();
        for point in &points {
            let (Some(day), Some(rank)) = (point.day(), point.rank()) else {
                continue;
            };
            axis.insert(day);
            per_day.insert(day, rank);
        }

        parsed.push((url.as_str(), per_day));
    }

    let dates: Vec<NaiveDate> = axis.into_iter().collect();

    let series = parsed
        .into_iter()
        .map(|(url, per_day)| EntitySeries {
            url: url.to_string(),
            label: display_label(url),
            positions: dates.iter().map(|d| per_day.get(d).copied()).collect(),
        })
        .collect();

    AlignedSeriesSet { dates, series }
}
