pub mod model;

use crate::database::WeeklyRepository;
use crate::domain::NewComment;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiReply;
use crate::validation::{require_clean_text, require_text};
use model::{CommentPayload, JsonComment};

// an unknown week simply has no comments
pub async fn list_comments(
    repo: &dyn WeeklyRepository,
    week_id: Option<&str>,
) -> ApiResult<ApiReply> {
    let week_id = week_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing week_id"))?;

    let comments = repo.list_comments(week_id).await?;
    let json_comments: Vec<JsonComment> = comments.iter().map(JsonComment::from).collect();
    ApiReply::data(&json_comments)
}

pub async fn create_comment(
    repo: &dyn WeeklyRepository,
    payload: CommentPayload,
) -> ApiResult<ApiReply> {
    let week_id = require_text(payload.week_id.as_ref(), "week_id")?
        .trim()
        .to_string();
    let author = require_clean_text(payload.author.as_ref(), "author")?;
    let text = require_clean_text(payload.text.as_ref(), "text")?;

    if !repo.week_exists(&week_id).await? {
        return Err(ApiError::not_found("Week not found"));
    }

    let comment = repo
        .insert_comment(&NewComment {
            week_id,
            author,
            text,
        })
        .await?;
    tracing::info!(id = comment.id, week_id = %comment.week_id, "Comment added");

    ApiReply::created("Comment added", &JsonComment::from(&comment))
}

/// A non-numeric id cannot name a comment, so it is reported as not found.
pub async fn delete_comment(repo: &dyn WeeklyRepository, id: Option<String>) -> ApiResult<ApiReply> {
    let id = id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing comment id"))?;

    let Ok(id) = id.parse::<i64>() else {
        return Err(ApiError::not_found("Comment not found"));
    };

    if repo.delete_comment(id).await? {
        tracing::info!(id, "Comment deleted");
        Ok(ApiReply::message("Comment deleted"))
    } else {
        Err(ApiError::not_found("Comment not found"))
    }
}
