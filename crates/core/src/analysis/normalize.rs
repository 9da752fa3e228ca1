use crate::analysis::json::extract_json;
use crate::analysis::{AnalysisReport, Bullet, SectionBody};
use crate::series::label::display_label;
use serde_json::{Map, Value};

/// Normalize the backend's loose analysis payload into an `AnalysisReport`,
/// or `None` when no recognized field is present and non-empty.
///
/// The payload may arrive wrapped in a `raw_analysis` text envelope that
/// itself embeds a (possibly fenced) JSON document; extraction or parse
/// failures fall back to the outer payload instead of erroring.
pub fn normalize_analysis(raw: &Value) -> Option<AnalysisReport> {
    let payload = unwrap_envelope(raw);
    let obj = payload.as_object()?;

    let report = AnalysisReport {
        summary: obj.get("summary").and_then(generic_body),
        volatility: obj.get("volatility_analysis").and_then(volatility_body),
        prediction: obj.get("prediction_analysis").and_then(prediction_body),
        patterns: obj.get("patterns_discovered").and_then(generic_body),
        recommendations: obj.get("recommendations").and_then(generic_body),
    };

    if report.is_empty() {
        None
    } else {
        Some(report)
    }
}

fn unwrap_envelope(raw: &Value) -> Value {
    let Some(text) = raw.get("raw_analysis").and_then(Value::as_str) else {
        return raw.clone();
    };

    if let Some(extracted) = extract_json(text) {
        if let Ok(parsed) = serde_json::from_str::<Value>(&extracted) {
            return parsed;
        }
    }
    if let Ok(parsed) = serde_json::from_str::<Value>(text) {
        return parsed;
    }

    raw.clone()
}

/// Shape-tolerant normalization for fields without known inner structure:
/// a string stays text, a list becomes bullets, a map becomes category
/// bullets (keys with `_`/`-` turned into spaces).
fn generic_body(value: &Value) -> Option<SectionBody> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(SectionBody::Text(s.to_string()))
            }
        }
        Value::Array(items) => {
            let bullets: Vec<Bullet> = items.iter().map(item_bullet).collect();
            if bullets.is_empty() {
                None
            } else {
                Some(SectionBody::Bullets(bullets))
            }
        }
        Value::Object(map) => {
            let bullets = category_bullets(map);
            if bullets.is_empty() {
                None
            } else {
                Some(SectionBody::Bullets(bullets))
            }
        }
        _ => None,
    }
}

fn category_bullets(map: &Map<String, Value>) -> Vec<Bullet> {
    map.iter()
        .map(|(category, value)| {
            let heading = format_category(category);
            match value {
                Value::Object(inner) => Bullet {
                    heading,
                    text: String::new(),
                    nested: inner
                        .iter()
                        .map(|(k, v)| Bullet {
                            heading: format_category(k),
                            text: value_text(v),
                            nested: Vec::new(),
                        })
                        .collect(),
                },
                Value::Array(items) => Bullet {
                    heading,
                    text: String::new(),
                    nested: items.iter().map(item_bullet).collect(),
                },
                other => Bullet {
                    heading,
                    text: value_text(other),
                    nested: Vec::new(),
                },
            }
        })
        .collect()
}

fn item_bullet(item: &Value) -> Bullet {
    match item {
        Value::Object(map) => {
            if let Some(url) = map.get("url").and_then(Value::as_str) {
                return Bullet {
                    heading: display_label(url),
                    text: annotation(map),
                    nested: Vec::new(),
                };
            }
            Bullet {
                heading: String::new(),
                text: value_text(item),
                nested: Vec::new(),
            }
        }
        other => Bullet::plain(value_text(other)),
    }
}

fn volatility_body(value: &Value) -> Option<SectionBody> {
    let Value::Object(map) = value else {
        return generic_body(value);
    };

    let mut groups: Vec<Bullet> = Vec::new();

    // Two alternate names exist upstream for the same finding; prefer the
    // first when both are present.
    let volatile = map
        .get("highly_volatile_urls")
        .or_else(|| map.get("high_volatility_urls"));
    if let Some(items) = volatile {
        push_url_group(&mut groups, "Highly volatile URLs", items);
    }
    if let Some(items) = map.get("stable_urls") {
        push_url_group(&mut groups, "Stable URLs", items);
    }

    if groups.is_empty() {
        // Object without the known finding keys: render it generically.
        return generic_body(value);
    }
    Some(SectionBody::Bullets(groups))
}

fn prediction_body(value: &Value) -> Option<SectionBody> {
    let Value::Object(map) = value else {
        return generic_body(value);
    };

    let mut groups: Vec<Bullet> = Vec::new();
    if let Some(items) = map.get("improving_urls") {
        push_url_group(&mut groups, "Improving URLs", items);
    }
    if let Some(items) = map.get("declining_urls") {
        push_url_group(&mut groups, "Declining URLs", items);
    }

    if groups.is_empty() {
        return generic_body(value);
    }
    Some(SectionBody::Bullets(groups))
}

fn push_url_group(groups: &mut Vec<Bullet>, heading: &str, items: &Value) {
    let Value::Array(items) = items else {
        return;
    };
    if items.is_empty() {
        return;
    }
    groups.push(Bullet {
        heading: heading.to_string(),
        text: String::new(),
        nested: items.iter().map(url_finding_bullet).collect(),
    });
}

fn url_finding_bullet(item: &Value) -> Bullet {
    match item {
        // Stable URLs sometimes arrive as bare strings.
        Value::String(url) => Bullet {
            heading: display_label(url),
            text: String::new(),
            nested: Vec::new(),
        },
        Value::Object(map) => {
            let url = map.get("url").and_then(Value::as_str).unwrap_or_default();
            Bullet {
                heading: display_label(url),
                text: annotation(map),
                nested: Vec::new(),
            }
        }
        other => Bullet::plain(value_text(other)),
    }
}

/// Per-entity annotation under either of two alternate keys.
fn annotation(map: &Map<String, Value>) -> String {
    map.get("note")
        .or_else(|| map.get("insight"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn format_category(key: &str) -> String {
    key.replace(['_', '-'], " ")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_payload_is_not_available() {
        assert!(normalize_analysis(&json!({})).is_none());
        assert!(normalize_analysis(&Value::Null).is_none());
        assert!(normalize_analysis(&json!({"summary": "", "recommendations": []})).is_none());
    }

    #[test]
    fn unwraps_fenced_json_inside_raw_analysis() {
        let raw = json!({
            "raw_analysis": "prefix ```json\n{\"summary\":\"x\"}\n``` suffix"
        });

        let report = normalize_analysis(&raw).unwrap();
        assert_eq!(report.summary, Some(SectionBody::Text("x".to_string())));
    }

    #[test]
    fn unparseable_raw_analysis_falls_back_to_outer_payload() {
        let raw = json!({
            "raw_analysis": "the model had { nothing machine-readable to say",
            "summary": "outer summary survives"
        });

        let report = normalize_analysis(&raw).unwrap();
        assert_eq!(
            report.summary,
            Some(SectionBody::Text("outer summary survives".to_string()))
        );
    }

    #[test]
    fn alternate_volatility_key_is_recognized() {
        let raw = json!({
            "volatility_analysis": {
                "high_volatility_urls": [{"url": "a.com", "note": "n"}]
            }
        });

        let report = normalize_analysis(&raw).unwrap();
        let SectionBody::Bullets(groups) = report.volatility.unwrap() else {
            panic!("expected bullets");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].nested[0].heading, "a.com");
        assert_eq!(groups[0].nested[0].text, "n");
    }

    #[test]
    fn preferred_volatility_key_wins_when_both_present() {
        let raw = json!({
            "volatility_analysis": {
                "highly_volatile_urls": [{"url": "first.com", "note": "kept"}],
                "high_volatility_urls": [{"url": "second.com", "note": "ignored"}]
            }
        });

        let report = normalize_analysis(&raw).unwrap();
        let SectionBody::Bullets(groups) = report.volatility.unwrap() else {
            panic!("expected bullets");
        };
        assert_eq!(groups[0].nested[0].heading, "first.com");
    }

    #[test]
    fn annotation_prefers_note_and_defaults_empty() {
        let raw = json!({
            "prediction_analysis": {
                "improving_urls": [
                    {"url": "a.com", "note": "rising", "insight": "shadowed"},
                    {"url": "b.com", "insight": "from insight"},
                    {"url": "c.com"}
                ]
            }
        });

        let report = normalize_analysis(&raw).unwrap();
        let SectionBody::Bullets(groups) = report.prediction.unwrap() else {
            panic!("expected bullets");
        };
        let items = &groups[0].nested;
        assert_eq!(items[0].text, "rising");
        assert_eq!(items[1].text, "from insight");
        assert_eq!(items[2].text, "");
    }

    #[test]
    fn stable_urls_accept_bare_strings() {
        let raw = json!({
            "volatility_analysis": {
                "stable_urls": ["https://www.steady.com/page", {"url": "calm.org", "insight": "flat"}]
            }
        });

        let report = normalize_analysis(&raw).unwrap();
        let SectionBody::Bullets(groups) = report.volatility.unwrap() else {
            panic!("expected bullets");
        };
        assert_eq!(groups[0].nested[0].heading, "steady.com");
        assert_eq!(groups[0].nested[1].text, "flat");
    }

    #[test]
    fn string_shaped_fields_stay_text() {
        let raw = json!({
            "volatility_analysis": "everything is calm",
            "recommendations": "keep publishing"
        });

        let report = normalize_analysis(&raw).unwrap();
        assert_eq!(
            report.volatility,
            Some(SectionBody::Text("everything is calm".to_string()))
        );
        assert_eq!(
            report.recommendations,
            Some(SectionBody::Text("keep publishing".to_string()))
        );
    }

    #[test]
    fn recommendation_lists_and_maps_become_bullets() {
        let raw = json!({
            "recommendations": {
                "content_quality": ["add FAQs", "expand intro"],
                "technical-seo": "fix redirects"
            }
        });

        let report = normalize_analysis(&raw).unwrap();
        let SectionBody::Bullets(bullets) = report.recommendations.unwrap() else {
            panic!("expected bullets");
        };
        assert_eq!(bullets[0].heading, "content quality");
        assert_eq!(bullets[0].nested[0].text, "add FAQs");
        assert_eq!(bullets[1].heading, "technical seo");
        assert_eq!(bullets[1].text, "fix redirects");
    }

    #[test]
    fn nested_pattern_maps_enumerate_two_levels() {
        let raw = json!({
            "patterns_discovered": {
                "weekly_cycles": {
                    "weekend_dip": "positions drop on Saturdays",
                    "monday_recovery": "positions recover by Monday"
                },
                "overall": "rankings oscillate"
            }
        });

        let report = normalize_analysis(&raw).unwrap();
        let SectionBody::Bullets(bullets) = report.patterns.unwrap() else {
            panic!("expected bullets");
        };
        assert_eq!(bullets.len(), 2);
        let weekly = bullets.iter().find(|b| b.heading == "weekly cycles").unwrap();
        assert_eq!(weekly.nested.len(), 2);
        assert!(weekly.nested.iter().any(|b| b.heading == "weekend dip"));
        let overall = bullets.iter().find(|b| b.heading == "overall").unwrap();
        assert_eq!(overall.text, "rankings oscillate");
    }

    #[test]
    fn malformed_urls_in_findings_never_panic() {
        let raw = json!({
            "volatility_analysis": {
                "highly_volatile_urls": [{"url": "not a url at all", "note": "n"}]
            }
        });

        let report = normalize_analysis(&raw).unwrap();
        let SectionBody::Bullets(groups) = report.volatility.unwrap() else {
            panic!("expected bullets");
        };
        assert_eq!(groups[0].nested[0].heading, "not a url at all");
    }
}
