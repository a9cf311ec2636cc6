use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Region;

/// Inclusive window over `projects.request_date`. A missing bound is open on that side.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct RegionCount {
    pub region: Region,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    pub total_projects: i64,
    pub clients_by_region: Vec<RegionCount>,
    pub campaigns_by_region: Vec<RegionCount>,
    pub briefs_approved: i64,
    pub videos_generated: i64,
    pub videos_approved: i64,
    pub campaigns_completed: i64,
}
