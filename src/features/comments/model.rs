use crate::domain::Comment;
use crate::features::weeks::model::TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub struct DbComment {
    pub id: i64,
    pub week_id: String,
    pub author: String,
    pub text: String,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JsonComment {
    pub id: i64,
    pub week_id: String,
    pub author: String,
    pub text: String,
    pub created_at: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct CommentPayload {
    pub id: Option<Value>,
    pub week_id: Option<Value>,
    pub author: Option<Value>,
    pub text: Option<Value>,
}

impl From<DbComment> for Comment {
    fn from(db_comment: DbComment) -> Self {
        Comment {
            id: db_comment.id,
            week_id: db_comment.week_id,
            author: db_comment.author,
            text: db_comment.text,
            created_at: db_comment.created_at,
        }
    }
}

impl From<&Comment> for JsonComment {
    fn from(comment: &Comment) -> Self {
        JsonComment {
            id: comment.id,
            week_id: comment.week_id.clone(),
            author: comment.author.clone(),
            text: comment.text.clone(),
            created_at: comment.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
