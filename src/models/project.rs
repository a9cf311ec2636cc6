use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "region")]
pub enum Region {
    #[serde(rename = "TN")]
    #[sqlx(rename = "TN")]
    Tn,
    Kerala,
    #[serde(rename = "AP")]
    #[sqlx(rename = "AP")]
    Ap,
    Telangana,
    Gujarat,
    Delhi,
    Mumbai,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Tn,
        Region::Kerala,
        Region::Ap,
        Region::Telangana,
        Region::Gujarat,
        Region::Delhi,
        Region::Mumbai,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::Tn => "TN",
            Region::Kerala => "Kerala",
            Region::Ap => "AP",
            Region::Telangana => "Telangana",
            Region::Gujarat => "Gujarat",
            Region::Delhi => "Delhi",
            Region::Mumbai => "Mumbai",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "category")]
pub enum Category {
    #[serde(rename = "FMCG")]
    #[sqlx(rename = "FMCG")]
    Fmcg,
    #[serde(rename = "Industrial Goods")]
    #[sqlx(rename = "Industrial Goods")]
    IndustrialGoods,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Fmcg, Category::IndustrialGoods];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Fmcg => "FMCG",
            Category::IndustrialGoods => "Industrial Goods",
        }
    }
}

/// Pipeline stage of a project. Declaration order is pipeline order; any stage may be set
/// from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "projectstatus")]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Brand description generated")]
    #[sqlx(rename = "Brand description generated")]
    BrandDescriptionGenerated,
    #[serde(rename = "Deck in progress")]
    #[sqlx(rename = "Deck in progress")]
    DeckInProgress,
    #[serde(rename = "Deck Shared")]
    #[sqlx(rename = "Deck Shared")]
    DeckShared,
    #[serde(rename = "Client approved")]
    #[sqlx(rename = "Client approved")]
    ClientApproved,
    #[serde(rename = "Client rejected")]
    #[sqlx(rename = "Client rejected")]
    ClientRejected,
    #[serde(rename = "Video production in progress")]
    #[sqlx(rename = "Video production in progress")]
    VideoProductionInProgress,
    #[serde(rename = "Video submitted for review")]
    #[sqlx(rename = "Video submitted for review")]
    VideoSubmittedForReview,
    #[serde(rename = "Video approved")]
    #[sqlx(rename = "Video approved")]
    VideoApproved,
    #[serde(rename = "Campaign signed up")]
    #[sqlx(rename = "Campaign signed up")]
    CampaignSignedUp,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 9] = [
        ProjectStatus::BrandDescriptionGenerated,
        ProjectStatus::DeckInProgress,
        ProjectStatus::DeckShared,
        ProjectStatus::ClientApproved,
        ProjectStatus::ClientRejected,
        ProjectStatus::VideoProductionInProgress,
        ProjectStatus::VideoSubmittedForReview,
        ProjectStatus::VideoApproved,
        ProjectStatus::CampaignSignedUp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::BrandDescriptionGenerated => "Brand description generated",
            ProjectStatus::DeckInProgress => "Deck in progress",
            ProjectStatus::DeckShared => "Deck Shared",
            ProjectStatus::ClientApproved => "Client approved",
            ProjectStatus::ClientRejected => "Client rejected",
            ProjectStatus::VideoProductionInProgress => "Video production in progress",
            ProjectStatus::VideoSubmittedForReview => "Video submitted for review",
            ProjectStatus::VideoApproved => "Video approved",
            ProjectStatus::CampaignSignedUp => "Campaign signed up",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub user_id: i64,
    pub region: Region,
    pub request_date: NaiveDate,
    pub city: String,
    pub salesperson_name: String,
    pub brand_name: String,
    pub category: Category,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ProjectPage {
    pub items: Vec<Project>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
