//! # Note operations
//!
//! [`NoteService`] is the one entry point the HTTP layer calls for notes. It
//! wires the three policy pieces around a [`NoteStore`]:
//!
//! | Operation | Flow | Failures |
//! |-----------|------|----------|
//! | [`create`](NoteService::create) | [`allocator`] reserve → hash password → [`allocator`] insert | `Conflict`, `Invalid` |
//! | [`get_by_slug`](NoteService::get_by_slug) | load → [`access::read_view`] | `NotFound` |
//! | [`verify_password`](NoteService::verify_password) | load → [`access::unlock`] | `NotFound`, `Unauthorized` |
//! | [`my_notes`](NoteService::my_notes) | list by owner → [`access::read_view`] each | — |
//! | [`update`](NoteService::update) | load → [`ownership::authorize`] → hash new password → store update | `NotFound`, `Forbidden`, `Invalid` |
//! | [`delete`](NoteService::delete) | load → [`ownership::authorize`] → store delete | `NotFound`, `Forbidden` |
//!
//! Any of them may also fail with `Unavailable` when the store is down.
//!
//! Ownership is checked against a note loaded inside the same call, never
//! against anything a client read earlier.

pub mod access;
pub mod allocator;
pub mod ownership;

use store::{NoteChanges, NoteStore, Patch, StoreError};
use uuid::Uuid;

use crate::auth::{hash_password_blocking, verify_decoy_blocking};
use crate::error::{ApiError, ApiResult};
use crate::models::{CreateNote, NoteView, Success, UpdateNote};
use allocator::{NoteDraft, SlugAllocator};

#[derive(Clone, Debug)]
pub struct NoteService<S> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a note owned by `owner` (or by nobody). The author gets the full
    /// view back, content included.
    pub async fn create(&self, input: CreateNote, owner: Option<Uuid>) -> ApiResult<NoteView> {
        let allocator = SlugAllocator::new(&self.store);
        let choice = allocator.reserve(input.slug.as_deref()).await?;

        let password_hash = match input.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(hash_password_blocking(password).await?),
            None => None,
        };

        let note = allocator
            .insert(
                choice,
                NoteDraft {
                    title: input.title,
                    content: input.content,
                    password_hash,
                    owner_id: owner,
                },
            )
            .await?;

        tracing::info!(
            note_id = %note.id,
            slug = %note.slug,
            locked = note.has_password(),
            "created note"
        );
        Ok(access::full_view(&note))
    }

    pub async fn get_by_slug(&self, slug: &str) -> ApiResult<NoteView> {
        let note = self.store.find_by_slug(slug).await.map_err(not_found)?;
        Ok(access::read_view(&note))
    }

    pub async fn verify_password(&self, slug: &str, password: &str) -> ApiResult<NoteView> {
        let note = match self.store.find_by_slug(slug).await {
            Ok(note) => note,
            Err(StoreError::NotFound(_)) => {
                // same cost as a wrong password
                verify_decoy_blocking(password.to_string()).await;
                return Err(ApiError::note_not_found());
            }
            Err(other) => return Err(other.into()),
        };
        access::unlock(&note, password).await
    }

    pub async fn my_notes(&self, owner: Uuid) -> ApiResult<Vec<NoteView>> {
        let notes = self.store.list_by_owner(owner).await?;
        Ok(notes.iter().map(access::read_view).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateNote,
        actor: Option<Uuid>,
    ) -> ApiResult<Success> {
        let note = self.store.find_by_id(id).await.map_err(not_found)?;
        ownership::authorize(&note, actor)?;

        let password_hash = match input.password {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Cleared => Patch::Cleared,
            Patch::Set(password) if password.is_empty() => {
                return Err(ApiError::Invalid(
                    "password must not be empty; send null to remove it".to_string(),
                ));
            }
            Patch::Set(password) => Patch::Set(hash_password_blocking(password).await?),
        };

        let changes = NoteChanges {
            title: input.title,
            content: input.content,
            password_hash,
        };
        if changes.is_empty() {
            tracing::debug!(note_id = %id, "empty update, nothing written");
            return Ok(Success::ok());
        }
        let password_change = match &changes.password_hash {
            Patch::Unchanged => "unchanged",
            Patch::Set(_) => "set",
            Patch::Cleared => "cleared",
        };
        self.store.update(id, changes).await.map_err(not_found)?;

        tracing::info!(note_id = %id, password = password_change, "updated note");
        Ok(Success::ok())
    }

    pub async fn delete(&self, id: Uuid, actor: Option<Uuid>) -> ApiResult<Success> {
        let note = self.store.find_by_id(id).await.map_err(not_found)?;
        ownership::authorize(&note, actor)?;
        self.store.delete(id).await.map_err(not_found)?;

        tracing::info!(note_id = %id, slug = %note.slug, "deleted note");
        Ok(Success::ok())
    }
}

fn not_found(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(_) => ApiError::note_not_found(),
        other => other.into(),
    }
}
