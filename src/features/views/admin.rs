use crate::config::AdminMode;
use crate::features::views::WeekCard;
use crate::features::views::source::{WeekSource, api_url, envelope_data, load_weeks};
use crate::response::Envelope;
use anyhow::{Context, Result};
use chrono::Utc;
use html_escape::{encode_double_quoted_attribute, encode_text};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

/// The admin page's working copy of the week collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminBoard {
    pub weeks: Vec<WeekCard>,
}

impl AdminBoard {
    pub fn new(weeks: Vec<WeekCard>) -> Self {
        Self { weeks }
    }

    pub fn add(&mut self, week: WeekCard) {
        self.weeks.push(week);
    }

    /// Removes every week with this id; returns whether any was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.weeks.len();
        self.weeks.retain(|week| week.id != id);
        self.weeks.len() != before
    }
}

/// The add-week form, using the admin page's field names.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct AdminWeekForm {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "start-date")]
    pub start_date: String,
    #[serde(default)]
    pub description: String,
    /// One link per line.
    #[serde(default, rename = "week-links")]
    pub week_links: String,
}

impl AdminWeekForm {
    pub fn into_card(self, id: String) -> WeekCard {
        WeekCard {
            id,
            title: self.title.trim().to_string(),
            start_date: self.start_date,
            description: self.description.trim().to_string(),
            links: self
                .week_links
                .lines()
                .map(str::trim)
                .filter(|link| !link.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

pub fn client_week_id() -> String {
    format!("week_{}", Utc::now().timestamp_millis())
}

pub fn render_week_row(week: &WeekCard) -> String {
    let id = encode_double_quoted_attribute(&week.id);
    format!(
        "<tr><td>{}</td><td>{}</td><td>\
         <button class=\"edit-btn\" data-id=\"{id}\">Edit</button>\
         <button class=\"delete-btn\" data-id=\"{id}\">Delete</button>\
         </td></tr>",
        encode_text(&week.title),
        encode_text(&week.description),
    )
}

pub fn render_admin_rows(board: &AdminBoard) -> String {
    board.weeks.iter().map(render_week_row).collect()
}

/// Drives the admin page. In [`AdminMode::Local`] edits only touch the
/// in-memory board; in [`AdminMode::Live`] they go through the API and the
/// board is reloaded from it.
pub struct AdminController {
    mode: AdminMode,
    source: WeekSource,
    client: Client,
    board: RwLock<AdminBoard>,
}

impl AdminController {
    pub fn new(mode: AdminMode, source: WeekSource, client: Client) -> Self {
        Self {
            mode,
            source,
            client,
            board: RwLock::new(AdminBoard::default()),
        }
    }

    pub fn mode(&self) -> AdminMode {
        self.mode
    }

    pub async fn board(&self) -> AdminBoard {
        self.board.read().await.clone()
    }

    /// Replaces the board with a fresh load and renders it. A failed load
    /// leaves the table empty.
    pub async fn reload(&self) -> String {
        let weeks = match load_weeks(&self.source, &self.client).await {
            Ok(weeks) => weeks,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "Error loading weeks");
                Vec::new()
            }
        };

        let mut board = self.board.write().await;
        *board = AdminBoard::new(weeks);
        render_admin_rows(&board)
    }

    pub async fn render(&self) -> String {
        render_admin_rows(&*self.board.read().await)
    }

    pub async fn add_week(&self, form: AdminWeekForm) -> String {
        let week = form.into_card(client_week_id());

        match self.mode {
            AdminMode::Local => {
                self.board.write().await.add(week);
                self.render().await
            }
            AdminMode::Live => {
                if let Err(e) = self.create_remote(&week).await {
                    tracing::warn!(error = %format!("{e:#}"), week_id = %week.id, "Failed to add week");
                    return self.render().await;
                }
                self.reload().await
            }
        }
    }

    pub async fn delete_week(&self, id: &str) -> String {
        match self.mode {
            AdminMode::Local => {
                self.board.write().await.remove(id);
                self.render().await
            }
            AdminMode::Live => {
                if let Err(e) = self.delete_remote(id).await {
                    tracing::warn!(error = %format!("{e:#}"), week_id = %id, "Failed to delete week");
                    return self.render().await;
                }
                self.reload().await
            }
        }
    }

    fn api_base(&self) -> Result<&str> {
        match &self.source {
            WeekSource::LiveApi(base) => Ok(base.as_str()),
            other => anyhow::bail!("Live admin mode needs an API source, got {:?}", other),
        }
    }

    async fn create_remote(&self, week: &WeekCard) -> Result<()> {
        let url = api_url(self.api_base()?, &[("resource", "weeks")])?;
        let body = json!({
            "week_id": week.id,
            "title": week.title,
            "start_date": week.start_date,
            "description": week.description,
            "links": week.links,
        });

        let envelope = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .context("Failed to reach the API")?
            .json::<Envelope>()
            .await
            .context("API returned a malformed envelope")?;

        envelope_data(envelope).map(|_| ())
    }

    async fn delete_remote(&self, id: &str) -> Result<()> {
        let url = api_url(self.api_base()?, &[("resource", "weeks"), ("week_id", id)])?;

        let envelope = self
            .client
            .delete(url)
            .send()
            .await
            .context("Failed to reach the API")?
            .json::<Envelope>()
            .await
            .context("API returned a malformed envelope")?;

        envelope_data(envelope).map(|_| ())
    }
}
