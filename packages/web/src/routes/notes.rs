use api::{CreateNote, NoteView, Success, UpdateNote, VerifyPassword};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::session::{current_user_id, require_user_id};
use crate::state::{AppState, AppStore};

pub async fn create<S: AppStore>(
    State(state): State<AppState<S>>,
    session: Session,
    AppJson(input): AppJson<CreateNote>,
) -> Result<(StatusCode, Json<NoteView>), AppError> {
    let owner = current_user_id(&session).await?;
    let note = state.notes.create(input, owner).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_by_slug<S: AppStore>(
    State(state): State<AppState<S>>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<NoteView>, AppError> {
    Ok(Json(state.notes.get_by_slug(&slug).await?))
}

pub async fn verify_password<S: AppStore>(
    State(state): State<AppState<S>>,
    AppPath(slug): AppPath<String>,
    AppJson(input): AppJson<VerifyPassword>,
) -> Result<Json<NoteView>, AppError> {
    Ok(Json(
        state.notes.verify_password(&slug, &input.password).await?,
    ))
}

pub async fn mine<S: AppStore>(
    State(state): State<AppState<S>>,
    session: Session,
) -> Result<Json<Vec<NoteView>>, AppError> {
    let owner = require_user_id(&session).await?;
    Ok(Json(state.notes.my_notes(owner).await?))
}

pub async fn update<S: AppStore>(
    State(state): State<AppState<S>>,
    session: Session,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<UpdateNote>,
) -> Result<Json<Success>, AppError> {
    let actor = current_user_id(&session).await?;
    Ok(Json(state.notes.update(id, input, actor).await?))
}

pub async fn delete<S: AppStore>(
    State(state): State<AppState<S>>,
    session: Session,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Success>, AppError> {
    let actor = current_user_id(&session).await?;
    Ok(Json(state.notes.delete(id, actor).await?))
}
