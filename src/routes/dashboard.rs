use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::AppQuery;
use crate::models::{DateRange, Metrics, RegionCount, Role};
use crate::state::SharedState;

const MANAGEMENT: &[Role] = &[Role::Management];

pub async fn metrics(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Metrics>, AppError> {
    auth.require_role(MANAGEMENT)?;

    let mut tx = state.pool.begin().await?;
    let metrics = db::dashboard::metrics(&mut tx, &range).await?;
    tx.commit().await?;

    Ok(Json(metrics))
}

pub async fn total_projects(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(MANAGEMENT)?;
    let mut conn = state.pool.acquire().await?;
    let count = db::dashboard::total_projects(&mut conn, &range).await?;
    Ok(Json(json!({ "total_projects": count })))
}

pub async fn clients_by_region(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Vec<RegionCount>>, AppError> {
    auth.require_role(MANAGEMENT)?;
    let mut conn = state.pool.acquire().await?;
    Ok(Json(db::dashboard::clients_by_region(&mut conn, &range).await?))
}

pub async fn campaigns_by_region(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Vec<RegionCount>>, AppError> {
    auth.require_role(MANAGEMENT)?;
    let mut conn = state.pool.acquire().await?;
    Ok(Json(db::dashboard::campaigns_by_region(&mut conn, &range).await?))
}

pub async fn briefs_approved(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(MANAGEMENT)?;
    let mut conn = state.pool.acquire().await?;
    let count = db::dashboard::briefs_approved(&mut conn, &range).await?;
    Ok(Json(json!({ "briefs_approved": count })))
}

pub async fn videos_generated(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(MANAGEMENT)?;
    let mut conn = state.pool.acquire().await?;
    let count = db::dashboard::videos_generated(&mut conn, &range).await?;
    Ok(Json(json!({ "videos_generated": count })))
}

pub async fn videos_approved(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(MANAGEMENT)?;
    let mut conn = state.pool.acquire().await?;
    let count = db::dashboard::videos_approved(&mut conn, &range).await?;
    Ok(Json(json!({ "videos_approved": count })))
}

pub async fn campaigns_completed(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(MANAGEMENT)?;
    let mut conn = state.pool.acquire().await?;
    let count = db::dashboard::campaigns_completed(&mut conn, &range).await?;
    Ok(Json(json!({ "campaigns_completed": count })))
}
