use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use crate::auth::jwt::TokenKind;
use crate::db;
use crate::error::AppError;
use crate::models::{Role, User};
use crate::state::SharedState;

/// The caller behind a valid, unexpired access token whose account still exists and is active.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.user.role) {
            Ok(())
        } else {
            Err(AppError::forbidden())
        }
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized("Not authenticated".to_string()))?;

        let claims = state
            .tokens
            .decode(bearer.token())
            .filter(|claims| claims.kind == TokenKind::Access)
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

        let user = db::users::find_by_id(&state.pool, user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(AuthUser { user })
    }
}
