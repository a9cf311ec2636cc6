use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "userrole", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Marketing/communications staff. The only role that may write projects.
    #[default]
    Marcom,
    Sales,
    Management,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Marcom, Role::Sales, Role::Management];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Marcom => "marcom",
            Role::Sales => "sales",
            Role::Management => "management",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}
