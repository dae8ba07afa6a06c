pub mod model;

use crate::database::WeeklyRepository;
use crate::domain::{NewWeek, WeekChanges, WeekListQuery};
use crate::error::{ApiError, ApiResult};
use crate::response::ApiReply;
use crate::validation::{
    links_field, non_empty_field, optional_clean_text, parse_exact_date, require_clean_text,
    require_text,
};
use model::{JsonWeek, WeekPayload};

pub async fn list_weeks(repo: &dyn WeeklyRepository, query: &WeekListQuery) -> ApiResult<ApiReply> {
    let weeks = repo.list_weeks(query).await?;
    let json_weeks: Vec<JsonWeek> = weeks.iter().map(JsonWeek::from).collect();
    ApiReply::data(&json_weeks)
}

pub async fn get_week(repo: &dyn WeeklyRepository, week_id: &str) -> ApiResult<ApiReply> {
    let week_id = week_id.trim();
    if week_id.is_empty() {
        return Err(ApiError::bad_request("Missing week_id"));
    }

    match repo.get_week(week_id).await? {
        Some(week) => ApiReply::data(&JsonWeek::from(&week)),
        None => Err(ApiError::not_found("Week not found")),
    }
}

pub async fn create_week(repo: &dyn WeeklyRepository, payload: WeekPayload) -> ApiResult<ApiReply> {
    let week_id = require_text(payload.week_id.as_ref(), "week_id")?
        .trim()
        .to_string();
    let title = require_clean_text(payload.title.as_ref(), "title")?;
    let raw_date = require_text(payload.start_date.as_ref(), "start_date")?;
    let description = require_clean_text(payload.description.as_ref(), "description")?;

    let start_date =
        parse_exact_date(&raw_date).ok_or_else(|| ApiError::bad_request("Invalid date format"))?;

    if repo.week_exists(&week_id).await? {
        return Err(ApiError::Conflict("week_id already exists".to_string()));
    }

    let new_week = NewWeek {
        week_id,
        title,
        start_date,
        description,
        links: links_field(payload.links.as_ref()).unwrap_or_default(),
    };

    // a concurrent create can still slip past the check above; the unique
    // constraint turns that into a Conflict via ApiError's From impl
    let week = repo.insert_week(&new_week).await?;
    tracing::info!(week_id = %week.week_id, "Week created");

    ApiReply::created("Week created", &JsonWeek::from(&week))
}

pub async fn update_week(repo: &dyn WeeklyRepository, payload: WeekPayload) -> ApiResult<ApiReply> {
    let week_id = non_empty_field(payload.week_id.as_ref())
        .map(|id| id.trim().to_string())
        .ok_or_else(|| ApiError::bad_request("Missing week_id"))?;

    if !repo.week_exists(&week_id).await? {
        return Err(ApiError::not_found("Week not found"));
    }

    let start_date = match non_empty_field(payload.start_date.as_ref()) {
        Some(raw) => {
            Some(parse_exact_date(&raw).ok_or_else(|| ApiError::bad_request("Invalid date"))?)
        }
        None => None,
    };

    let changes = WeekChanges {
        title: optional_clean_text(payload.title.as_ref()),
        start_date,
        description: optional_clean_text(payload.description.as_ref()),
        links: links_field(payload.links.as_ref()),
    };

    if changes.is_empty() {
        return Err(ApiError::bad_request("Nothing to update"));
    }

    match repo.update_week(&week_id, &changes).await? {
        Some(week) => {
            tracing::info!(week_id = %week.week_id, "Week updated");
            ApiReply::message("Week updated").with_data(&JsonWeek::from(&week))
        }
        // deleted between the existence check and the update
        None => Err(ApiError::not_found("Week not found")),
    }
}

pub async fn delete_week(
    repo: &dyn WeeklyRepository,
    week_id: Option<String>,
) -> ApiResult<ApiReply> {
    let week_id = week_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing week_id"))?;

    match repo.delete_week_cascade(&week_id).await? {
        Some(comments_removed) => {
            tracing::info!(%week_id, comments_removed, "Week deleted");
            Ok(ApiReply::message("Week and related comments deleted"))
        }
        None => Err(ApiError::not_found("Week not found")),
    }
}
