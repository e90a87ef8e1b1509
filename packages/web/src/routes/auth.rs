use api::{Success, UserInfo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::extract::AppJson;
use crate::session::{current_user_id, sign_in, sign_out};
use crate::state::{AppState, AppStore};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create a local account and sign it in.
pub async fn register<S: AppStore>(
    State(state): State<AppState<S>>,
    session: Session,
    AppJson(input): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), AppError> {
    let user = state
        .accounts
        .register(&input.email, &input.password, &input.name)
        .await?;
    sign_in(&session, user.id).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login<S: AppStore>(
    State(state): State<AppState<S>>,
    session: Session,
    AppJson(input): AppJson<LoginRequest>,
) -> Result<Json<UserInfo>, AppError> {
    let user = state.accounts.login(&input.email, &input.password).await?;
    sign_in(&session, user.id).await?;
    tracing::info!(user_id = %user.id, "signed in");
    Ok(Json(user))
}

pub async fn logout(session: Session) -> Result<Json<Success>, AppError> {
    sign_out(&session).await?;
    Ok(Json(Success::ok()))
}

/// The signed-in user, or `null`.
pub async fn me<S: AppStore>(
    State(state): State<AppState<S>>,
    session: Session,
) -> Result<Json<Option<UserInfo>>, AppError> {
    let Some(user_id) = current_user_id(&session).await? else {
        return Ok(Json(None));
    };
    let user = state.accounts.current_user(user_id).await?;
    if user.is_none() {
        // account is gone; drop the stale session
        sign_out(&session).await?;
    }
    Ok(Json(user))
}
