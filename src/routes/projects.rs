use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, SecondsFormat};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::projects::{NewProject, ProjectChanges, ProjectFilters};
use crate::error::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::{Category, Project, ProjectPage, ProjectStatus, Region, Role};
use crate::state::SharedState;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

const MAX_CITY_LEN: usize = 100;
const MAX_SALESPERSON_LEN: usize = 150;
const MAX_BRAND_LEN: usize = 200;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub region: Option<Region>,
    pub status: Option<ProjectStatus>,
    pub category: Option<Category>,
    pub salesperson: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub region: Region,
    pub request_date: NaiveDate,
    pub city: String,
    pub salesperson_name: String,
    pub brand_name: String,
    pub category: Category,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl CreateProject {
    fn validate(&self) -> Result<(), AppError> {
        check_text("city", &self.city, MAX_CITY_LEN)?;
        check_text("salesperson_name", &self.salesperson_name, MAX_SALESPERSON_LEN)?;
        check_text("brand_name", &self.brand_name, MAX_BRAND_LEN)
    }
}

/// Partial update. Absent and `null` fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub region: Option<Region>,
    pub request_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub salesperson_name: Option<String>,
    pub brand_name: Option<String>,
    pub category: Option<Category>,
    pub status: Option<ProjectStatus>,
}

impl UpdateProject {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(city) = &self.city {
            check_text("city", city, MAX_CITY_LEN)?;
        }
        if let Some(name) = &self.salesperson_name {
            check_text("salesperson_name", name, MAX_SALESPERSON_LEN)?;
        }
        if let Some(name) = &self.brand_name {
            check_text("brand_name", name, MAX_BRAND_LEN)?;
        }
        Ok(())
    }
}

impl From<UpdateProject> for ProjectChanges {
    fn from(req: UpdateProject) -> Self {
        ProjectChanges {
            region: req.region,
            request_date: req.request_date,
            city: req.city,
            salesperson_name: req.salesperson_name,
            brand_name: req.brand_name,
            category: req.category,
            status: req.status,
        }
    }
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field}: must not be empty")));
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field}: must be at most {max} characters"
        )));
    }
    Ok(())
}

fn require_marcom(auth: &AuthUser, action: &str) -> Result<(), AppError> {
    auth.require_role(&[Role::Marcom])
        .map_err(|_| AppError::Forbidden(format!("Only Marcom users can {action} projects")))
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<ProjectPage>, AppError> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);
    if page < 1 {
        return Err(AppError::Validation("page: must be at least 1".to_string()));
    }
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(AppError::Validation(format!(
            "per_page: must be between 1 and {MAX_PER_PAGE}"
        )));
    }

    let filters = ProjectFilters {
        region: params.region,
        status: params.status,
        category: params.category,
        salesperson: params.salesperson,
        brand: params.brand,
    };

    let offset = (page - 1).saturating_mul(per_page);
    let items = db::projects::list(&state.pool, &filters, per_page, offset).await?;
    let total = db::projects::count(&state.pool, &filters).await?;

    Ok(Json(ProjectPage {
        items,
        total,
        page,
        per_page,
    }))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppJson(req): AppJson<CreateProject>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    req.validate()?;
    require_marcom(&auth, "create")?;

    let project = db::projects::create(
        &state.pool,
        &NewProject {
            user_id: auth.id(),
            region: req.region,
            request_date: req.request_date,
            city: &req.city,
            salesperson_name: &req.salesperson_name,
            brand_name: &req.brand_name,
            category: req.category,
            status: req.status,
        },
    )
    .await?;

    tracing::info!(project_id = project.id, user_id = auth.id(), "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Project>, AppError> {
    let project = db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateProject>,
) -> Result<Json<Project>, AppError> {
    req.validate()?;
    require_marcom(&auth, "update")?;

    let project = db::projects::update(&state.pool, id, &req.into())
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    tracing::info!(project_id = project.id, user_id = auth.id(), "Project updated");
    Ok(Json(project))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    require_marcom(&auth, "delete")?;

    if !db::projects::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    tracing::info!(project_id = id, user_id = auth.id(), "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let projects = db::projects::list_all(&state.pool).await?;
    let csv = export_csv(&projects)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=projects.csv",
            ),
        ],
        csv,
    ))
}

fn export_csv(projects: &[Project]) -> Result<Vec<u8>, AppError> {
    let csv_err = |e: csv::Error| AppError::Internal(format!("CSV export failed: {e}"));

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record([
            "ID",
            "Region",
            "City",
            "Salesperson",
            "Brand",
            "Category",
            "Status",
            "Created At",
        ])
        .map_err(csv_err)?;

    for p in projects {
        writer
            .write_record([
                p.id.to_string().as_str(),
                p.region.label(),
                p.city.as_str(),
                p.salesperson_name.as_str(),
                p.brand_name.as_str(),
                p.category.label(),
                p.status.label(),
                p.created_at
                    .to_rfc3339_opts(SecondsFormat::Micros, false)
                    .as_str(),
            ])
            .map_err(csv_err)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV export failed: {e}")))
}
