//! # Access policy — what a reader may see of a note
//!
//! | Stored state | Plain read ([`read_view`]) | [`unlock`] with attempt |
//! |--------------|----------------------------|-------------------------|
//! | no password hash | full content | full content, attempt ignored |
//! | password hash set | metadata, `content = null`, `hasPassword = true` | full content on match, `Unauthorized` otherwise |
//!
//! The mismatch error carries a fixed message and nothing about why the
//! attempt failed.

use store::Note;

use crate::auth::verify_password_blocking;
use crate::error::{ApiError, ApiResult};
use crate::models::NoteView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Locked,
}

pub fn visibility(note: &Note) -> Visibility {
    if note.has_password() {
        Visibility::Locked
    } else {
        Visibility::Public
    }
}

/// The default view of a note for any reader.
pub fn read_view(note: &Note) -> NoteView {
    match visibility(note) {
        Visibility::Public => full_view(note),
        Visibility::Locked => NoteView {
            content: None,
            ..full_view(note)
        },
    }
}

/// The view with content, regardless of password state. Only hand this out
/// after [`unlock`] or to the author at creation time.
pub(crate) fn full_view(note: &Note) -> NoteView {
    NoteView {
        id: note.id,
        slug: note.slug.clone(),
        title: note.title.clone(),
        content: Some(note.content.clone()),
        has_password: note.has_password(),
        owner_id: note.owner_id,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

/// Check a password attempt against the note and return the full view when it
/// passes. Notes without a password pass unconditionally.
pub async fn unlock(note: &Note, attempt: &str) -> ApiResult<NoteView> {
    let Some(hash) = note.password_hash.clone() else {
        return Ok(full_view(note));
    };

    if verify_password_blocking(attempt.to_string(), hash).await? {
        Ok(full_view(note))
    } else {
        tracing::info!(slug = %note.slug, "rejected note password");
        Err(ApiError::wrong_password())
    }
}
