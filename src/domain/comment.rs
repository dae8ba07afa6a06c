use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub week_id: String,
    pub author: String,
    pub text: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub week_id: String,
    pub author: String,
    pub text: String,
}
