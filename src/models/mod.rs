pub mod dashboard;
pub mod project;
pub mod refresh_token;
pub mod user;

pub use dashboard::{DateRange, Metrics, RegionCount};
pub use project::{Category, Project, ProjectPage, ProjectStatus, Region};
pub use refresh_token::RefreshToken;
pub use user::{Role, User};
