pub mod auth;
pub mod dashboard;
pub mod projects;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me).put(auth::update_me))
        // Projects
        .route("/api/v1/projects", get(projects::list).post(projects::create))
        .route("/api/v1/projects/", get(projects::list).post(projects::create))
        .route("/api/v1/projects/export", get(projects::export))
        .route(
            "/api/v1/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        // Dashboard
        .route("/api/v1/dashboard/metrics", get(dashboard::metrics))
        .route("/api/v1/dashboard/total-projects", get(dashboard::total_projects))
        .route("/api/v1/dashboard/clients-by-region", get(dashboard::clients_by_region))
        .route("/api/v1/dashboard/campaigns-by-region", get(dashboard::campaigns_by_region))
        .route("/api/v1/dashboard/briefs-approved", get(dashboard::briefs_approved))
        .route("/api/v1/dashboard/videos-generated", get(dashboard::videos_generated))
        .route("/api/v1/dashboard/videos-approved", get(dashboard::videos_approved))
        .route("/api/v1/dashboard/campaigns-completed", get(dashboard::campaigns_completed))
}
