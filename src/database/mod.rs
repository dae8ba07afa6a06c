use crate::domain::{Comment, NewComment, NewWeek, Week, WeekChanges, WeekListQuery};
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// storage for weeks and their comments; sqlx::Pool is thread safe so an
// implementation can be shared behind an Arc
#[async_trait]
pub trait WeeklyRepository: Send + Sync {
    async fn list_weeks(&self, query: &WeekListQuery) -> Result<Vec<Week>>;
    async fn get_week(&self, week_id: &str) -> Result<Option<Week>>;
    async fn week_exists(&self, week_id: &str) -> Result<bool>;

    // write operations
    async fn insert_week(&self, week: &NewWeek) -> Result<Week>;
    /// Returns `None` when no week has this id.
    async fn update_week(&self, week_id: &str, changes: &WeekChanges) -> Result<Option<Week>>;
    /// Removes the week's comments and then the week as one unit. Returns the
    /// number of comments removed, or `None` when no week has this id.
    async fn delete_week_cascade(&self, week_id: &str) -> Result<Option<u64>>;

    async fn list_comments(&self, week_id: &str) -> Result<Vec<Comment>>;
    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment>;
    async fn delete_comment(&self, id: i64) -> Result<bool>;
}
