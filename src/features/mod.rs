pub mod comments;
pub mod views;
pub mod weeks;
