use url::Url;

/// Short display label for a tracked URL: the host with a leading `www.`
/// stripped. Malformed input falls back to the raw string and never fails.
pub fn display_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return raw.to_string();
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if let Ok(parsed) = Url::parse(&candidate) {
        if let Some(host) = parsed.host_str() {
            let host = host.strip_prefix("www.").unwrap_or(host);
            if !host.is_empty() {
                return host.to_string();
            }
        }
    }

    // Best-effort fallback: the part before the first path separator.
    trimmed
        .split('/')
        .find(|part| !part.is_empty())
        .unwrap_or(trimmed)
        .to_string()
}
