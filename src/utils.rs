// src/utils.rs
use url::Url;

/// Collapse all runs of whitespace (including newlines) into single spaces
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn a free-text search term into a URL fragment joined by `separator`.
/// Words are lower-cased and form-encoded individually.
pub fn slugify_query(text: &str, separator: &str) -> String {
    text.split_whitespace()
        .map(|word| url::form_urlencoded::byte_serialize(word.to_lowercase().as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Resolve a scraped href against the source origin.
/// Returns an empty string when the href is empty, cannot be resolved, or
/// resolves to anything other than an http(s) URL (`javascript:`, `mailto:`).
pub fn absolutize_link(href: &str, base_origin: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    Url::parse(base_origin)
        .and_then(|base| base.join(href))
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(|url| url.to_string())
        .unwrap_or_default()
}

/// Remove a surrounding markdown code fence (```json ... ```) from model output
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening fence line
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Truncate on a char boundary, for log lines that echo remote content
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
