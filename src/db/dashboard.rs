use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::models::{DateRange, Metrics, ProjectStatus, RegionCount};

fn push_range(qb: &mut QueryBuilder<'_, Postgres>, range: &DateRange) {
    if let Some(start) = range.start_date {
        qb.push(" AND request_date >= ").push_bind(start);
    }
    if let Some(end) = range.end_date {
        qb.push(" AND request_date <= ").push_bind(end);
    }
}

fn push_statuses(qb: &mut QueryBuilder<'_, Postgres>, statuses: &[ProjectStatus]) {
    if statuses.is_empty() {
        return;
    }
    qb.push(" AND status IN (");
    let mut separated = qb.separated(", ");
    for status in statuses {
        separated.push_bind(*status);
    }
    separated.push_unseparated(")");
}

/// Rows in range whose status is any of `statuses`. An empty slice counts every row.
pub async fn count_projects(
    conn: &mut PgConnection,
    range: &DateRange,
    statuses: &[ProjectStatus],
) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM projects WHERE TRUE");
    push_range(&mut qb, range);
    push_statuses(&mut qb, statuses);

    qb.build_query_scalar::<i64>().fetch_one(conn).await
}

pub async fn total_projects(conn: &mut PgConnection, range: &DateRange) -> Result<i64, sqlx::Error> {
    count_projects(conn, range, &[]).await
}

/// Distinct brand names per region; two rows for one brand in one region count once.
pub async fn clients_by_region(
    conn: &mut PgConnection,
    range: &DateRange,
) -> Result<Vec<RegionCount>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT region, COUNT(DISTINCT brand_name) AS count FROM projects WHERE TRUE",
    );
    push_range(&mut qb, range);
    qb.push(" GROUP BY region ORDER BY region");

    qb.build_query_as::<RegionCount>().fetch_all(conn).await
}

pub async fn campaigns_by_region(
    conn: &mut PgConnection,
    range: &DateRange,
) -> Result<Vec<RegionCount>, sqlx::Error> {
    let mut qb =
        QueryBuilder::<Postgres>::new("SELECT region, COUNT(*) AS count FROM projects WHERE TRUE");
    push_range(&mut qb, range);
    push_statuses(&mut qb, &[ProjectStatus::CampaignSignedUp]);
    qb.push(" GROUP BY region ORDER BY region");

    qb.build_query_as::<RegionCount>().fetch_all(conn).await
}

pub async fn briefs_approved(conn: &mut PgConnection, range: &DateRange) -> Result<i64, sqlx::Error> {
    count_projects(conn, range, &[ProjectStatus::ClientApproved]).await
}

pub async fn videos_generated(
    conn: &mut PgConnection,
    range: &DateRange,
) -> Result<i64, sqlx::Error> {
    count_projects(
        conn,
        range,
        &[ProjectStatus::VideoSubmittedForReview, ProjectStatus::VideoApproved],
    )
    .await
}

pub async fn videos_approved(conn: &mut PgConnection, range: &DateRange) -> Result<i64, sqlx::Error> {
    count_projects(conn, range, &[ProjectStatus::VideoApproved]).await
}

pub async fn campaigns_completed(
    conn: &mut PgConnection,
    range: &DateRange,
) -> Result<i64, sqlx::Error> {
    count_projects(conn, range, &[ProjectStatus::CampaignSignedUp]).await
}

/// Every figure at once, read from a single snapshot.
pub async fn metrics(conn: &mut PgConnection, range: &DateRange) -> Result<Metrics, sqlx::Error> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *conn)
        .await?;

    Ok(Metrics {
        total_projects: total_projects(conn, range).await?,
        clients_by_region: clients_by_region(conn, range).await?,
        campaigns_by_region: campaigns_by_region(conn, range).await?,
        briefs_approved: briefs_approved(conn, range).await?,
        videos_generated: videos_generated(conn, range).await?,
        videos_approved: videos_approved(conn, range).await?,
        campaigns_completed: campaigns_completed(conn, range).await?,
    })
}
