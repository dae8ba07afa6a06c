use crate::features::views::WeekCard;
use crate::response::Envelope;
use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, Url};
use std::path::PathBuf;

/// Where a page controller loads its week collection from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekSource {
    /// A `weeks.json` document on disk.
    StaticFile(PathBuf),
    /// A `weeks.json` document served over HTTP.
    StaticUrl(String),
    /// The live API's `/api` entry point; weeks are read from the envelope.
    LiveApi(String),
}

impl WeekSource {
    /// `http(s)://` locations are fetched, anything else is read from disk.
    pub fn static_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            WeekSource::StaticUrl(location.to_string())
        } else {
            WeekSource::StaticFile(PathBuf::from(location))
        }
    }
}

pub async fn load_weeks(source: &WeekSource, client: &Client) -> Result<Vec<WeekCard>> {
    match source {
        WeekSource::StaticFile(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Unable to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Malformed week collection in {}", path.display()))
        }
        WeekSource::StaticUrl(url) => {
            let response = client
                .get(url)
                .send()
                .await
                .with_context(|| format!("Failed to fetch {}", url))?;
            if !response.status().is_success() {
                bail!("Fetching {} failed with status {}", url, response.status());
            }
            response
                .json::<Vec<WeekCard>>()
                .await
                .with_context(|| format!("Malformed week collection at {}", url))
        }
        WeekSource::LiveApi(base) => {
            let url = api_url(base, &[("resource", "weeks")])?;
            let envelope = client
                .get(url)
                .send()
                .await
                .with_context(|| format!("Failed to reach the API at {}", base))?
                .json::<Envelope>()
                .await
                .context("API returned a malformed envelope")?;
            let data = envelope_data(envelope)?;
            serde_json::from_value(data).context("API returned malformed weeks")
        }
    }
}

/// Builds `<base>?k=v&...` with proper query encoding.
pub fn api_url(base: &str, pairs: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid API URL {}", base))?;
    url.query_pairs_mut().extend_pairs(pairs);
    Ok(url)
}

/// Unwraps a successful envelope's data, or turns its error into ours.
pub fn envelope_data(envelope: Envelope) -> Result<serde_json::Value> {
    if !envelope.success {
        return Err(anyhow!(
            "API error: {}",
            envelope.error.unwrap_or_else(|| "unknown".to_string())
        ));
    }
    Ok(envelope.data.unwrap_or(serde_json::Value::Array(Vec::new())))
}
