use crate::error::{ApiError, ApiResult};
use chrono::NaiveDate;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date, rejecting anything that does not format back
/// to exactly the same string (so `2024-2-5` and `2024-02-30` both fail).
pub fn parse_exact_date(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    if date.format(DATE_FORMAT).to_string() == raw {
        Some(date)
    } else {
        None
    }
}

/// Strips markup and surrounding whitespace from user supplied text.
pub fn sanitize(raw: &str) -> String {
    strip_tags(raw.trim()).trim().to_string()
}

// a '<' only opens a tag when it looks like one, so "1 < 2" survives intact
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }

        let opens_tag = matches!(
            chars.peek(),
            Some(next) if next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')
        );
        if !opens_tag {
            out.push(c);
            continue;
        }

        let mut quote: Option<char> = None;
        for inner in chars.by_ref() {
            match (quote, inner) {
                (Some(q), ch) if ch == q => quote = None,
                (Some(_), _) => {}
                (None, '"') | (None, '\'') => quote = Some(inner),
                (None, '>') => break,
                (None, _) => {}
            }
        }
    }

    out
}

/// Reads a scalar request field as text. Numbers are accepted and rendered
/// as their JSON text; anything else counts as absent.
pub fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`text_field`], but treats blank values as absent.
pub fn non_empty_field(value: Option<&Value>) -> Option<String> {
    text_field(value).filter(|s| !s.trim().is_empty())
}

/// Returns the links if the value is an array, keeping order. Non-string
/// scalars are kept as their JSON text.
pub fn links_field(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    }
}

/// A required field: blank or absent fails with "Missing field: <name>".
pub fn require_text(value: Option<&Value>, field: &str) -> ApiResult<String> {
    non_empty_field(value).ok_or_else(|| ApiError::missing_field(field))
}

/// A required free-text field, sanitized. Text that is nothing but markup
/// counts as missing.
pub fn require_clean_text(value: Option<&Value>, field: &str) -> ApiResult<String> {
    let clean = sanitize(&require_text(value, field)?);
    if clean.is_empty() {
        return Err(ApiError::missing_field(field));
    }
    Ok(clean)
}

/// An optional free-text field, sanitized; blank results are dropped.
pub fn optional_clean_text(value: Option<&Value>) -> Option<String> {
    non_empty_field(value)
        .map(|raw| sanitize(&raw))
        .filter(|clean| !clean.is_empty())
}
