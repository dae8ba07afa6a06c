use crate::features::views::WeekCard;
use html_escape::{encode_double_quoted_attribute, encode_text};
use reqwest::Url;

pub const LOAD_FAILURE_HTML: &str = "<p>Unable to load weeks at the moment.</p>";

// only the query of this URL is used; the host is a placeholder
const DETAILS_PAGE: &str = "http://localhost/details.html";

/// Relative link to a week's detail page, with the id query-encoded.
pub fn details_href(id: &str) -> String {
    match Url::parse_with_params(DETAILS_PAGE, &[("id", id)]) {
        Ok(url) => format!("details.html?{}", url.query().unwrap_or_default()),
        Err(_) => "details.html".to_string(),
    }
}

pub fn render_week_article(week: &WeekCard) -> String {
    format!(
        "<article><h2>{}</h2><p>Starts on: {}</p><p>{}</p>\
         <a href=\"{}\">View Details &amp; Discussion</a></article>",
        encode_text(&week.title),
        encode_text(&week.start_date),
        encode_text(&week.description),
        encode_double_quoted_attribute(&details_href(&week.id)),
    )
}

pub fn render_week_list(weeks: &[WeekCard]) -> String {
    weeks.iter().map(render_week_article).collect()
}

/// Contents of the list section. A failed load is logged and replaced with
/// a placeholder message.
pub fn render_list_section(weeks: anyhow::Result<Vec<WeekCard>>) -> String {
    match weeks {
        Ok(weeks) => render_week_list(&weeks),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "Error loading weeks");
            LOAD_FAILURE_HTML.to_string()
        }
    }
}
