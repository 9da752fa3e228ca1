/// Best-effort extraction of a JSON document embedded in free text.
///
/// Handles a ```json fenced block anywhere in the text, a generic leading
/// fence, and finally the span from the first '{' to the last '}'.
pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();

    if let Some(idx) = trimmed.find("```json") {
        let after = &trimmed[idx + "```json".len()..];
        let inner = match after.find("```") {
            Some(end) => &after[..end],
            None => after,
        };
        return Some(inner.trim().to_string());
    }

    if trimmed.starts_with("```") {
        // Remove a generic Markdown fence (``` ... ```).
        let mut inner = trimmed;
        if let Some(after_first) = inner.splitn(2, '\n').nth(1) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    // Best-effort extraction: first '{' to last '}'.
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}
