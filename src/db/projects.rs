use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{Category, Project, ProjectStatus, Region};

/// Conjunctive list filters. Enum fields match exactly; text fields are case-insensitive
/// substring matches.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilters {
    pub region: Option<Region>,
    pub status: Option<ProjectStatus>,
    pub category: Option<Category>,
    pub salesperson: Option<String>,
    pub brand: Option<String>,
}

pub struct NewProject<'a> {
    pub user_id: i64,
    pub region: Region,
    pub request_date: NaiveDate,
    pub city: &'a str,
    pub salesperson_name: &'a str,
    pub brand_name: &'a str,
    pub category: Category,
    pub status: ProjectStatus,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub region: Option<Region>,
    pub request_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub salesperson_name: Option<String>,
    pub brand_name: Option<String>,
    pub category: Option<Category>,
    pub status: Option<ProjectStatus>,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &ProjectFilters) {
    if let Some(region) = filters.region {
        qb.push(" AND region = ").push_bind(region);
    }
    if let Some(status) = filters.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(category) = filters.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if let Some(salesperson) = filters.salesperson.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND salesperson_name ILIKE ")
            .push_bind(contains_pattern(salesperson));
    }
    if let Some(brand) = filters.brand.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND brand_name ILIKE ").push_bind(contains_pattern(brand));
    }
}

/// `%needle%` with LIKE metacharacters in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub async fn list(
    pool: &PgPool,
    filters: &ProjectFilters,
    limit: i64,
    offset: i64,
) -> Result<Vec<Project>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM projects WHERE TRUE");
    push_filters(&mut qb, filters);
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    qb.build_query_as::<Project>().fetch_all(pool).await
}

pub async fn count(pool: &PgPool, filters: &ProjectFilters) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM projects WHERE TRUE");
    push_filters(&mut qb, filters);

    qb.build_query_scalar::<i64>().fetch_one(pool).await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, new: &NewProject<'_>) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects
            (user_id, region, request_date, city, salesperson_name, brand_name, category, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(new.user_id)
    .bind(new.region)
    .bind(new.request_date)
    .bind(new.city)
    .bind(new.salesperson_name)
    .bind(new.brand_name)
    .bind(new.category)
    .bind(new.status)
    .fetch_one(pool)
    .await
}

/// Patch the given fields. Returns `None` when no project has this id.
pub async fn update(
    pool: &PgPool,
    id: i64,
    changes: &ProjectChanges,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects SET
            region = COALESCE($2, region),
            request_date = COALESCE($3, request_date),
            city = COALESCE($4, city),
            salesperson_name = COALESCE($5, salesperson_name),
            brand_name = COALESCE($6, brand_name),
            category = COALESCE($7, category),
            status = COALESCE($8, status),
            updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(changes.region)
    .bind(changes.request_date)
    .bind(changes.city.as_deref())
    .bind(changes.salesperson_name.as_deref())
    .bind(changes.brand_name.as_deref())
    .bind(changes.category)
    .bind(changes.status)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
