//! # Slug allocation
//!
//! Two modes, picked by whether the client sent a slug:
//!
//! - **Chosen**: the candidate is validated ([`Slug::parse`]) and checked
//!   against the store before any password hashing happens. A taken slug is a
//!   `Conflict` with "slug already taken — choose another"; nothing is renamed
//!   or suffixed.
//! - **Generated**: a random token is drawn per attempt. A collision at insert
//!   time regenerates, up to [`MAX_GENERATION_ATTEMPTS`] tries.
//!
//! The existence check is only a fast path. Two writers can both pass it, so
//! the store's own uniqueness enforcement decides; its `Conflict` is mapped to
//! the same client error as a pre-check hit.

use store::{NewNote, Note, NoteStore, Slug, StoreError};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub const MAX_GENERATION_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugChoice {
    Chosen(Slug),
    Generated,
}

/// Everything of a new note except its slug.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub password_hash: Option<String>,
    pub owner_id: Option<Uuid>,
}

impl NoteDraft {
    fn with_slug(&self, slug: Slug) -> NewNote {
        NewNote {
            slug,
            title: self.title.clone(),
            content: self.content.clone(),
            password_hash: self.password_hash.clone(),
            owner_id: self.owner_id,
        }
    }
}

pub struct SlugAllocator<'a, S> {
    store: &'a S,
}

impl<'a, S: NoteStore> SlugAllocator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Validate the candidate and make sure it is free right now.
    pub async fn reserve(&self, candidate: Option<&str>) -> ApiResult<SlugChoice> {
        let Some(candidate) = candidate else {
            return Ok(SlugChoice::Generated);
        };
        let slug = Slug::parse(candidate)?;
        if self.store.exists_by_slug(slug.as_str()).await? {
            return Err(ApiError::slug_taken());
        }
        Ok(SlugChoice::Chosen(slug))
    }

    /// Insert the draft under the reserved slug.
    pub async fn insert(&self, choice: SlugChoice, draft: NoteDraft) -> ApiResult<Note> {
        match choice {
            SlugChoice::Chosen(slug) => self
                .store
                .insert(draft.with_slug(slug))
                .await
                .map_err(ApiError::from),
            SlugChoice::Generated => {
                for attempt in 1..=MAX_GENERATION_ATTEMPTS {
                    let slug = Slug::generate();
                    match self.store.insert(draft.with_slug(slug)).await {
                        Ok(note) => return Ok(note),
                        Err(StoreError::Conflict(_)) => {
                            tracing::debug!(attempt, "generated slug collided, retrying");
                        }
                        Err(other) => return Err(other.into()),
                    }
                }
                tracing::warn!(
                    attempts = MAX_GENERATION_ATTEMPTS,
                    "gave up generating a free slug"
                );
                Err(ApiError::Conflict(
                    "could not generate a free slug, try again".to_string(),
                ))
            }
        }
    }
}
