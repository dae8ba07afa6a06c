use crate::database::WeeklyRepository;
use crate::domain::{Comment, NewComment, NewWeek, Week, WeekChanges, WeekListQuery};
use crate::features::comments::model::DbComment;
use crate::features::weeks::model::DbWeek;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite};

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

// sqlite's LIKE and NOCASE only fold ASCII, so search folds in Rust
fn matches_search(week: &Week, needle: &str) -> bool {
    week.title.to_lowercase().contains(needle) || week.description.to_lowercase().contains(needle)
}

#[async_trait]
impl WeeklyRepository for SqliteRepository {
    async fn list_weeks(&self, query: &WeekListQuery) -> Result<Vec<Week>> {
        // column and direction come from closed enums, never from the request
        let sql = format!(
            "SELECT * FROM weeks ORDER BY {} {}, id ASC",
            query.sort.column(),
            query.order.keyword()
        );

        let db_weeks = sqlx::query_as::<_, DbWeek>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list weeks")?;

        let weeks = db_weeks
            .into_iter()
            .map(Week::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(match &query.search {
            Some(search) => {
                let needle = search.to_lowercase();
                weeks
                    .into_iter()
                    .filter(|week| matches_search(week, &needle))
                    .collect()
            }
            None => weeks,
        })
    }

    async fn get_week(&self, week_id: &str) -> Result<Option<Week>> {
        let db_week_opt = sqlx::query_as::<_, DbWeek>("SELECT * FROM weeks WHERE week_id = ?")
            .bind(week_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to load week {}", week_id))?;

        match db_week_opt {
            Some(db_week) => Ok(Some(db_week.try_into()?)),
            None => Ok(None),
        }
    }

    async fn week_exists(&self, week_id: &str) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM weeks WHERE week_id = ?")
            .bind(week_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to look up week {}", week_id))?;

        Ok(found.is_some())
    }

    async fn insert_week(&self, week: &NewWeek) -> Result<Week> {
        let now = Utc::now().naive_utc();
        let links = serde_json::to_string(&week.links)?;

        let db_week = sqlx::query_as::<_, DbWeek>(
            r#"
            INSERT INTO weeks (
                week_id, title, start_date, description, links, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&week.week_id)
        .bind(&week.title)
        .bind(week.start_date)
        .bind(&week.description)
        .bind(links)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to insert week {}", week.week_id))?;

        db_week.try_into()
    }

    async fn update_week(&self, week_id: &str, changes: &WeekChanges) -> Result<Option<Week>> {
        let links = changes
            .links
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let db_week_opt = sqlx::query_as::<_, DbWeek>(
            r#"
            UPDATE weeks
            SET
                title = COALESCE(?, title),
                start_date = COALESCE(?, start_date),
                description = COALESCE(?, description),
                links = COALESCE(?, links),
                updated_at = ?
            WHERE week_id = ?
            RETURNING *
            "#,
        )
        .bind(&changes.title)
        .bind(changes.start_date)
        .bind(&changes.description)
        .bind(links)
        .bind(Utc::now().naive_utc())
        .bind(week_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to update week {}", week_id))?;

        match db_week_opt {
            Some(db_week) => Ok(Some(db_week.try_into()?)),
            None => Ok(None),
        }
    }

    async fn delete_week_cascade(&self, week_id: &str) -> Result<Option<u64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to open delete transaction")?;

        // comments strictly before the week
        let comments_removed = sqlx::query("DELETE FROM comments WHERE week_id = ?")
            .bind(week_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to delete comments of week {}", week_id))?
            .rows_affected();

        let weeks_removed = sqlx::query("DELETE FROM weeks WHERE week_id = ?")
            .bind(week_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to delete week {}", week_id))?
            .rows_affected();

        if weeks_removed == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit()
            .await
            .with_context(|| format!("Failed to commit deletion of week {}", week_id))?;

        Ok(Some(comments_removed))
    }

    async fn list_comments(&self, week_id: &str) -> Result<Vec<Comment>> {
        let db_comments = sqlx::query_as::<_, DbComment>(
            "SELECT * FROM comments WHERE week_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(week_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to list comments of week {}", week_id))?;

        Ok(db_comments.into_iter().map(Comment::from).collect())
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment> {
        let db_comment = sqlx::query_as::<_, DbComment>(
            r#"
            INSERT INTO comments (week_id, author, text, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&comment.week_id)
        .bind(&comment.author)
        .bind(&comment.text)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to add comment to week {}", comment.week_id))?;

        Ok(db_comment.into())
    }

    async fn delete_comment(&self, id: i64) -> Result<bool> {
        let removed = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete comment {}", id))?
            .rows_affected();

        Ok(removed > 0)
    }
}
