//! Session-held identity.
//!
//! The only thing stored in a session is the signed-in user's id, under
//! [`USER_ID_KEY`]. Handlers turn it into the `actor` the note service checks
//! ownership against.

use api::ApiError;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;

pub const USER_ID_KEY: &str = "user_id";

/// The signed-in user, if any.
pub async fn current_user_id(session: &Session) -> Result<Option<Uuid>, AppError> {
    Ok(session.get::<Uuid>(USER_ID_KEY).await?)
}

/// Like [`current_user_id`] but a missing session is `Unauthorized`.
pub async fn require_user_id(session: &Session) -> Result<Uuid, AppError> {
    current_user_id(session)
        .await?
        .ok_or_else(|| ApiError::not_authenticated().into())
}

/// Bind the session to `user_id`, issuing a fresh session id.
pub async fn sign_in(session: &Session, user_id: Uuid) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

pub async fn sign_out(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}
