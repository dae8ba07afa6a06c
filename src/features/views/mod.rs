//! Server-rendered versions of the admin and public week pages.
//!
//! Each page is a load step ([`source::load_weeks`]) followed by a pure
//! render function over [`WeekCard`]s, so both can be exercised without a
//! browser.

pub mod admin;
pub mod list;
pub mod source;

use crate::AppState;
use admin::AdminWeekForm;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::{Deserialize, Serialize};

/// The client-side view of a week. Accepts both the static file's field
/// names (`id`, `startDate`) and the API's (`week_id`, `start_date`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WeekCard {
    #[serde(alias = "week_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "startDate", alias = "start_date")]
    pub start_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub links: Vec<String>,
}

pub fn views_router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_page_handler))
        .route("/admin/weeks", post(admin_add_week_handler))
        .route("/admin/weeks/{id}/delete", post(admin_delete_week_handler))
        .route("/list", get(list_page_handler))
}

// a fresh load discards any local-mode edits, like reloading the page
async fn admin_page_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.admin.reload().await)
}

async fn admin_add_week_handler(
    State(state): State<AppState>,
    Form(form): Form<AdminWeekForm>,
) -> Html<String> {
    Html(state.admin.add_week(form).await)
}

async fn admin_delete_week_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Html<String> {
    Html(state.admin.delete_week(&id).await)
}

async fn list_page_handler(State(state): State<AppState>) -> Html<String> {
    let weeks = source::load_weeks(&state.config.list_source(), &state.http).await;
    Html(list::render_list_section(weeks))
}
