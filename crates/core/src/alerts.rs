use crate::backend::types::PredictionSeries;
use crate::series::label::display_label;
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_THRESHOLD: u32 = 5;

/// Alert when a URL's predicted position change exceeds the user threshold,
/// or when the backend's predictor already flagged it as volatile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolatilityAlert {
    pub url: String,
    pub label: String,
    pub current: Option<u32>,
    pub predicted: u32,
    /// Signed change in position; positive means dropping in the rankings.
    pub change: i64,
    pub flagged_volatile: bool,
}

/// Evaluate the user's volatility threshold (1..=10) against the raw
/// prediction map. Entities without usable predictions are ignored.
pub fn evaluate_alerts(
    predictions: &BTreeMap<String, Value>,
    threshold: u32,
) -> anyhow::Result<Vec<VolatilityAlert>> {
    anyhow::ensure!(
        (1..=10).contains(&threshold),
        "alert threshold must be 1..=10 (got {threshold})"
    );

    let mut out = Vec::new();
    for (url, value) in predictions {
        let Some(series) = PredictionSeries::from_value(value) else {
            continue;
        };
        let Some(predicted) = series.final_rank() else {
            continue;
        };

        let baseline = series.current_position.or_else(|| series.first_rank());
        let Some(baseline) = baseline else {
            continue;
        };

        let change = i64::from(predicted) - i64::from(baseline);
        let flagged_volatile = series.is_volatile.unwrap_or(false);

        if change.unsigned_abs() > u64::from(threshold) || flagged_volatile {
            out.push(VolatilityAlert {
                url: url.clone(),
                label: display_label(url),
                current: series.current_position,
                predicted,
                change,
                flagged_volatile,
            });
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(entries: Vec<(&str, Value)>) -> BTreeMap<String, Value> {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        assert!(evaluate_alerts(&BTreeMap::new(), 0).is_err());
        assert!(evaluate_alerts(&BTreeMap::new(), 11).is_err());
    }

    #[test]
    fn alerts_only_above_threshold() {
        let input = map(vec![
            (
                "https://falling.com",
                json!({
                    "current_position": 2,
                    "predictions": [{"date": "2026-03-05", "position": 9}]
                }),
            ),
            (
                "https://steady.com",
                json!({
                    "current_position": 3,
                    "predictions": [{"date": "2026-03-05", "position": 4}]
                }),
            ),
        ]);

        let alerts = evaluate_alerts(&input, 5).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].label, "falling.com");
        assert_eq!(alerts[0].change, 7);
    }

    #[test]
    fn backend_volatility_flag_always_alerts() {
        let input = map(vec![(
            "https://jumpy.com",
            json!({
                "current_position": 5,
                "is_volatile": true,
                "predictions": [{"date": "2026-03-05", "position": 5}]
            }),
        )]);

        let alerts = evaluate_alerts(&input, 10).unwrap();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].flagged_volatile);
        assert_eq!(alerts[0].change, 0);
    }

    #[test]
    fn falls_back_to_first_prediction_when_current_missing() {
        let input = map(vec![(
            "https://a.com",
            json!({
                "predictions": [
                    {"date": "2026-03-05", "position": 1},
                    {"date": "2026-03-09", "position": 9}
                ]
            }),
        )]);

        let alerts = evaluate_alerts(&input, 5).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].current, None);
        assert_eq!(alerts[0].change, 8);
    }

    #[test]
    fn skips_entities_without_usable_predictions() {
        let input = map(vec![
            ("https://a.com", json!({"trend": 0.2})),
            ("https://b.com", json!("n/a")),
        ]);

        assert!(evaluate_alerts(&input, 5).unwrap().is_empty());
    }
}
