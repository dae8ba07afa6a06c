use crate::domain::Week;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{}", week_id)]
pub struct DbWeek {
    pub id: i64,
    pub week_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub description: String,
    pub links: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JsonWeek {
    pub week_id: String,
    pub title: String,
    pub start_date: String,
    pub description: String,
    pub links: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of a week POST/PUT/DELETE. Fields stay loosely typed so that a
/// missing or mistyped field surfaces as a validation message rather than a
/// deserialization failure.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct WeekPayload {
    pub week_id: Option<Value>,
    pub title: Option<Value>,
    pub start_date: Option<Value>,
    pub description: Option<Value>,
    pub links: Option<Value>,
}

impl TryFrom<DbWeek> for Week {
    type Error = anyhow::Error;

    fn try_from(db_week: DbWeek) -> Result<Self> {
        let links: Vec<String> = serde_json::from_str(&db_week.links)
            .with_context(|| format!("Malformed links stored for week {}", db_week))?;

        Ok(Week {
            week_id: db_week.week_id,
            title: db_week.title,
            start_date: db_week.start_date,
            description: db_week.description,
            links,
            created_at: db_week.created_at,
            updated_at: db_week.updated_at,
        })
    }
}

impl From<&Week> for JsonWeek {
    fn from(week: &Week) -> Self {
        JsonWeek {
            week_id: week.week_id.clone(),
            title: week.title.clone(),
            start_date: week.start_date.format("%Y-%m-%d").to_string(),
            description: week.description.clone(),
            links: week.links.clone(),
            created_at: week.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: week.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
