use std::sync::LazyLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{fingerprint, TokenKind, TokenService};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::extract::{AppForm, AppJson};
use crate::models::{Role, User};
use crate::state::SharedState;

const MIN_PASSWORD_LEN: usize = 6;
const MAX_EMAIL_LEN: usize = 255;
const MAX_FULL_NAME_LEN: usize = 100;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<Role>,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(&self.email) {
            return Err(AppError::Validation(
                "email: value is not a valid email address".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "password: must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        validate_full_name(self.full_name.as_deref())
    }
}

/// OAuth2 password-grant form: `username` carries the email address.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

fn validate_full_name(full_name: Option<&str>) -> Result<(), AppError> {
    match full_name {
        Some(name) if name.chars().count() > MAX_FULL_NAME_LEN => Err(AppError::Validation(
            format!("full_name: must be at most {MAX_FULL_NAME_LEN} characters"),
        )),
        _ => Ok(()),
    }
}

fn invalid_refresh() -> AppError {
    AppError::Unauthorized("Invalid refresh token".to_string())
}

/// Sign an access/refresh pair and persist the refresh token's fingerprint.
async fn issue_token_pair<'e, E: sqlx::PgExecutor<'e>>(
    tokens: &TokenService,
    executor: E,
    user_id: i64,
) -> Result<TokenPair, AppError> {
    let access_token = tokens.issue_access(user_id).map_err(AppError::Internal)?;
    let refresh = tokens.issue_refresh(user_id).map_err(AppError::Internal)?;

    db::refresh_tokens::create(executor, user_id, &fingerprint(&refresh.token), refresh.expires_at)
        .await?;

    Ok(TokenPair {
        access_token,
        refresh_token: refresh.token,
        token_type: "bearer",
    })
}

pub async fn register(
    State(state): State<SharedState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    req.validate()?;

    if db::users::find_by_email(&state.pool, &req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let hashed = password::hash(&req.password).map_err(AppError::Internal)?;

    let user = db::users::create(
        &state.pool,
        &req.email,
        &hashed,
        req.full_name.as_deref(),
        req.role.unwrap_or_default(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Email already registered".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered: {}", user.email);

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<SharedState>,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Json<TokenPair>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = db::users::find_by_email(&state.pool, &form.username)
        .await?
        .ok_or_else(invalid)?;

    let valid = password::verify(&form.password, &user.hashed_password)
        .map_err(AppError::Internal)?;
    if !valid {
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Unauthorized("Account is disabled".to_string()));
    }

    let pair = issue_token_pair(&state.tokens, &state.pool, user.id).await?;
    Ok(Json(pair))
}

pub async fn refresh(
    State(state): State<SharedState>,
    AppJson(req): AppJson<RefreshRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let claims = state
        .tokens
        .decode(&req.refresh_token)
        .filter(|claims| claims.kind == TokenKind::Refresh)
        .ok_or_else(invalid_refresh)?;

    // Revoking the old token and storing its successor commit together.
    let mut tx = state.pool.begin().await?;

    let stored = db::refresh_tokens::consume(&mut *tx, &fingerprint(&req.refresh_token))
        .await?
        .ok_or_else(invalid_refresh)?;

    if claims.user_id() != Some(stored.user_id) {
        return Err(invalid_refresh());
    }

    let user = db::users::find_by_id(&mut *tx, stored.user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(invalid_refresh)?;

    let pair = issue_token_pair(&state.tokens, &mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "Refresh token rotated");
    Ok(Json(pair))
}

pub async fn logout(
    State(state): State<SharedState>,
    AppJson(req): AppJson<RefreshRequest>,
) -> Result<StatusCode, AppError> {
    let revoked =
        db::refresh_tokens::revoke_by_hash(&state.pool, &fingerprint(&req.refresh_token)).await?;
    if revoked > 0 {
        tracing::debug!("Refresh token revoked on logout");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

pub async fn update_me(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppJson(req): AppJson<UpdateMeRequest>,
) -> Result<Json<User>, AppError> {
    validate_full_name(req.full_name.as_deref())?;

    let user = match req.full_name {
        Some(full_name) => db::users::update_full_name(&state.pool, auth.id(), &full_name).await?,
        None => auth.user,
    };
    Ok(Json(user))
}
