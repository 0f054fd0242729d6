//! License normalization.
//!
//! BOM producers express licenses as SPDX IDs, free-text names, URLs, or
//! slash-separated dual-license strings. Everything here reduces those shapes
//! to plain string tokens:
//!
//! - IDs pass through verbatim (they are assumed to already be canonical)
//! - names are cleaned up, trimmed and upper-cased
//! - SPDX `expression` entries are not supported and yield nothing

use serde_json::Value;

/// Suffixes removed from URL-shaped license names.
const URL_FILE_SUFFIXES: &[&str] = &[".txt", ".html"];

/// Normalize a free-text license name into an upper-case token.
///
/// Returns `None` when nothing is left after normalization.
#[must_use]
pub fn normalize_license_name(text: &str) -> Option<String> {
    let cleaned = if text.contains("http") {
        let mut base = text.rsplit('/').next().unwrap_or_default().to_string();
        for suffix in URL_FILE_SUFFIXES {
            base = base.replace(suffix, "");
        }
        base
    } else if text.contains('/') {
        cleanup_license_string(text)
    } else {
        text.to_string()
    };

    let token = cleaned.trim().to_uppercase();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Collapse a slash/ampersand separated license string into one `OR` expression.
///
/// `"MIT/Apache-2.0"` becomes `"MIT OR Apache-2.0"`, `"(BSD & MIT)"` becomes
/// `"BSD OR MIT"`. Case is left alone.
#[must_use]
pub fn cleanup_license_string(text: &str) -> String {
    text.split(['/', '&'])
        .map(|part| part.trim().trim_matches(|c: char| c == '(' || c == ')').trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Licenses of one CycloneDX JSON `licenses[]` entry.
///
/// Accepts both `{"id": ..}` / `{"name": ..}` and the nested
/// `{"license": {"id": ..}}` form. Expression entries are skipped.
#[must_use]
pub fn licenses_from_json(entry: &Value) -> Vec<String> {
    let license = match entry.get("license") {
        Some(nested) if nested.is_object() => nested,
        _ => entry,
    };

    let non_empty = |key: &str| {
        license
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    if let Some(id) = non_empty("id") {
        return vec![id.to_string()];
    }
    non_empty("name")
        .and_then(normalize_license_name)
        .into_iter()
        .collect()
}

/// Apply the XML rule: if any IDs exist, return them verbatim; otherwise
/// normalize the names.
///
/// Each slice holds the text of the `license/id` (resp. `license/name`)
/// elements found under one component's `licenses` element.
#[must_use]
pub fn licenses_from_xml(ids: &[&str], names: &[&str]) -> Vec<String> {
    let ids: Vec<String> = ids
        .iter()
        .filter(|id| !id.is_empty())
        .map(|id| (*id).to_string())
        .collect();
    if !ids.is_empty() {
        return ids;
    }
    names
        .iter()
        .filter_map(|name| normalize_license_name(name))
        .collect()
}
