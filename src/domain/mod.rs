mod comment;
mod week;

pub use comment::{Comment, NewComment};
pub use week::{NewWeek, SortField, SortOrder, Week, WeekChanges, WeekListQuery};
