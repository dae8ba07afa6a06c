use crate::validation::{links_field, non_empty_field, parse_exact_date, sanitize, text_field};
use chrono::NaiveDate;
use serde_json::json;

#[test]
fn exact_date_accepts_real_calendar_dates() {
    assert_eq!(
        parse_exact_date("2025-01-06"),
        NaiveDate::from_ymd_opt(2025, 1, 6)
    );
    assert!(parse_exact_date("2024-02-29").is_some());
}

#[test]
fn exact_date_rejects_impossible_or_loose_input() {
    assert!(parse_exact_date("2024-02-30").is_none());
    assert!(parse_exact_date("2023-02-29").is_none());
    assert!(parse_exact_date("2024-2-5").is_none());
    assert!(parse_exact_date("06/01/2025").is_none());
    assert!(parse_exact_date("2025-01-06T00:00:00").is_none());
    assert!(parse_exact_date("").is_none());
}

#[test]
fn sanitize_strips_markup_and_trims() {
    assert_eq!(sanitize("  <b>Intro</b> to <i>Rust</i>  "), "Intro to Rust");
    assert_eq!(sanitize("<script>alert('x')</script>hi"), "alert('x')hi");
    assert_eq!(sanitize(r#"<a href="x>y">link</a>"#), "link");
    assert_eq!(sanitize("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    assert_eq!(sanitize("<b></b>"), "");
}

#[test]
fn fields_coerce_scalars_only() {
    let body = json!({"a": "x", "b": 7, "c": true, "d": "   "});
    assert_eq!(text_field(body.get("a")), Some("x".to_string()));
    assert_eq!(text_field(body.get("b")), Some("7".to_string()));
    assert_eq!(text_field(body.get("c")), None);
    assert_eq!(text_field(body.get("missing")), None);
    assert_eq!(non_empty_field(body.get("d")), None);
}

#[test]
fn links_require_an_array() {
    let body = json!({"links": ["https://a", "https://b", 3], "bad": "https://a"});
    assert_eq!(
        links_field(body.get("links")),
        Some(vec!["https://a".into(), "https://b".into(), "3".into()])
    );
    assert_eq!(links_field(body.get("bad")), None);
}
