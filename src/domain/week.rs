use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub week_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub description: String,
    pub links: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A validated, sanitized week ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWeek {
    pub week_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub description: String,
    pub links: Vec<String>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekChanges {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub links: Option<Vec<String>>,
}

impl WeekChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start_date.is_none()
            && self.description.is_none()
            && self.links.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Title,
    #[default]
    StartDate,
    CreatedAt,
}

impl SortField {
    /// Unrecognized values fall back to the default rather than erroring.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => SortField::Title,
            Some("start_date") => SortField::StartDate,
            Some("created_at") => SortField::CreatedAt,
            _ => SortField::default(),
        }
    }

    /// The `ORDER BY` expression for this field. Titles compare without
    /// regard to case.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Title => "title COLLATE NOCASE",
            SortField::StartDate => "start_date",
            SortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|o| o.to_ascii_lowercase()).as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekListQuery {
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
}
