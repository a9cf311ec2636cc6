pub mod dashboard;
pub mod projects;
pub mod refresh_tokens;
pub mod users;
