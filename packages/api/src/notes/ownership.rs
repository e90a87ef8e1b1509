//! Ownership guard for mutating note operations.
//!
//! Only the identity recorded as `owner_id` may update or delete a note.
//! Notes created anonymously have no owner and can therefore never be
//! mutated, and anonymous callers never own anything.

use store::Note;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// `note` must be freshly loaded for the current request.
pub fn authorize(note: &Note, actor: Option<Uuid>) -> ApiResult<()> {
    match (note.owner_id, actor) {
        (Some(owner), Some(actor)) if owner == actor => Ok(()),
        _ => {
            tracing::warn!(
                note_id = %note.id,
                actor = ?actor,
                "rejected mutation by non-owner"
            );
            Err(ApiError::not_owner())
        }
    }
}
