use rankflux_core::alerts::VolatilityAlert;
use rankflux_core::analysis::{AnalysisReport, Bullet, SectionBody};
use rankflux_core::backend::types::ContentReport;
use rankflux_core::domain::keyword::Keyword;
use rankflux_core::domain::series::AlignedSeriesSet;

pub fn render_keywords(keywords: &[Keyword]) -> String {
    let mut out = String::new();
    out.push_str("Keywords\n");

    if keywords.is_empty() {
        out.push_str("No keywords added yet\n");
        return out;
    }

    for k in keywords {
        match &k.industry {
            Some(industry) => out.push_str(&format!("  [{}] {} ({industry})\n", k.id, k.term)),
            None => out.push_str(&format!("  [{}] {}\n", k.id, k.term)),
        }
    }
    out
}

/// One aligned-series panel as a date × URL table, `-` for absent positions.
pub fn render_series_table(title: &str, set: &AlignedSeriesSet, empty_message: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}\n"));

    if set.is_empty() {
        out.push_str(&format!("{empty_message}\n"));
        return out;
    }

    let widths: Vec<usize> = set.series.iter().map(|s| s.label.len().max(4)).collect();

    out.push_str(&format!("{:<12}", "date"));
    for (s, w) in set.series.iter().zip(&widths) {
        out.push_str(&format!("  {:>w$}", s.label, w = w));
    }
    out.push('\n');

    for (i, date) in set.dates.iter().enumerate() {
        out.push_str(&format!("{:<12}", date.format("%Y-%m-%d").to_string()));
        for (s, w) in set.series.iter().zip(&widths) {
            match s.positions.get(i).copied().flatten() {
                Some(p) => out.push_str(&format!("  {p:>w$}", w = w)),
                None => out.push_str(&format!("  {:>w$}", "-", w = w)),
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_analysis(report: Option<&AnalysisReport>) -> String {
    let mut out = String::new();
    out.push_str("Claude Analysis\n");

    let Some(report) = report else {
        out.push_str("No analysis data available.\n");
        return out;
    };

    push_section(&mut out, "Summary", report.summary.as_ref());
    push_section(&mut out, "Volatility Analysis", report.volatility.as_ref());
    push_section(&mut out, "Prediction Analysis", report.prediction.as_ref());
    push_section(&mut out, "Patterns Discovered", report.patterns.as_ref());
    push_section(&mut out, "Recommended Actions", report.recommendations.as_ref());
    out
}

fn push_section(out: &mut String, heading: &str, body: Option<&SectionBody>) {
    let Some(body) = body else {
        return;
    };

    out.push_str(&format!("\n{heading}:\n"));
    match body {
        SectionBody::Text(text) => out.push_str(&format!("{text}\n")),
        SectionBody::Bullets(bullets) => push_bullets(out, bullets, 0),
    }
}

fn push_bullets(out: &mut String, bullets: &[Bullet], depth: usize) {
    for b in bullets {
        let indent = "  ".repeat(depth);
        match (b.heading.is_empty(), b.text.is_empty()) {
            (false, false) => out.push_str(&format!("{indent}- {}: {}\n", b.heading, b.text)),
            (false, true) => out.push_str(&format!("{indent}- {}\n", b.heading)),
            _ => out.push_str(&format!("{indent}- {}\n", b.text)),
        }
        push_bullets(out, &b.nested, depth + 1);
    }
}

pub fn render_alerts(alerts: &[VolatilityAlert], threshold: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("Alerts (threshold {threshold})\n"));

    if alerts.is_empty() {
        out.push_str("No alerts\n");
        return out;
    }

    for a in alerts {
        let direction = if a.change > 0 { "drops" } else { "gains" };
        let current = a
            .current
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!(
            "  {} {direction} {} positions (now {current}, predicted {})",
            a.label,
            a.change.unsigned_abs(),
            a.predicted,
        ));
        if a.flagged_volatile {
            out.push_str(" [volatile]");
        }
        out.push('\n');
    }
    out
}

pub fn render_content_report(report: &ContentReport) -> String {
    let mut out = String::new();
    out.push_str("Content Gap Analysis\n");

    if let Some(score) = report.competitiveness_score {
        out.push_str(&format!("Competitiveness score: {score}\n"));
    }

    if !report.strengths.is_empty() {
        out.push_str("\nStrengths:\n");
        for s in &report.strengths {
            out.push_str(&format!("- {s}\n"));
        }
    }

    if !report.weaknesses.is_empty() {
        out.push_str("\nWeaknesses:\n");
        for w in &report.weaknesses {
            out.push_str(&format!("- {w}\n"));
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for r in &report.recommendations {
            out.push_str(&format!("- {r}\n"));
        }
    }

    if report.competitiveness_score.is_none()
        && report.strengths.is_empty()
        && report.weaknesses.is_empty()
        && report.recommendations.is_empty()
    {
        match &report.raw_analysis {
            Some(text) => out.push_str(&format!("{}\n", text.trim())),
            None => out.push_str("No analysis data available.\n"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankflux_core::series::align_rankings;
    use rankflux_core::domain::keyword::RankingObservation;

    fn obs(url: &str, day: &str, position: u32) -> RankingObservation {
        let timestamp = chrono::NaiveDateTime::parse_from_str(
            &format!("{day}T08:00:00"),
            "%Y-%m-%dT%H:%M:%S",
        )
        .unwrap();
        RankingObservation {
            url: url.to_string(),
            position,
            timestamp,
        }
    }

    #[test]
    fn series_table_shows_labels_dates_and_gaps() {
        let set = align_rankings(&[
            obs("https://a.com", "2026-03-01", 3),
            obs("https://b.com", "2026-03-02", 5),
        ]);

        let text = render_series_table("Ranking History", &set, "No ranking data available");
        assert!(text.starts_with("Ranking History\n"));
        assert!(text.contains("a.com"));
        assert!(text.contains("b.com"));
        assert!(text.contains("2026-03-01"));
        assert!(text.contains('-'));
    }

    #[test]
    fn empty_set_renders_placeholder() {
        let set = AlignedSeriesSet::default();
        let text = render_series_table("Ranking Predictions", &set, "No prediction data available");
        assert!(text.contains("No prediction data available"));
    }

    #[test]
    fn missing_analysis_renders_placeholder() {
        let text = render_analysis(None);
        assert!(text.contains("No analysis data available."));
    }

    #[test]
    fn analysis_sections_render_in_order() {
        let report = AnalysisReport {
            summary: Some(SectionBody::Text("steady climb".to_string())),
            recommendations: Some(SectionBody::Bullets(vec![Bullet::plain("add FAQs")])),
            ..Default::default()
        };

        let text = render_analysis(Some(&report));
        let summary_at = text.find("Summary:").unwrap();
        let recs_at = text.find("Recommended Actions:").unwrap();
        assert!(summary_at < recs_at);
        assert!(text.contains("- add FAQs"));
    }
}
