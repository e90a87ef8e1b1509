//! # Storage contracts for notes and identities
//!
//! Everything above this module talks to persistence through two narrow async
//! traits, so the same access-control logic runs against the in-process
//! [`crate::MemoryStore`] (tests, local development) and the Postgres store in
//! the `api` crate.
//!
//! ## [`NoteStore`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | `insert` | Persists a [`NewNote`]. A slug that is already taken fails with [`StoreError::Conflict`]; the check is part of the write itself, never a separate read. |
//! | `find_by_slug` / `find_by_id` | Load one note or fail with [`StoreError::NotFound`]. |
//! | `update` | Applies [`NoteChanges`], refreshes `updated_at` and returns the new state. |
//! | `delete` | Removes a note. Unknown ids fail with [`StoreError::NotFound`]. |
//! | `exists_by_slug` | Cheap pre-check used by the slug allocator before hashing. |
//! | `list_by_owner` | All notes of one owner, most recently updated first. |
//!
//! ## [`UserStore`]
//!
//! Insert and lookup of identities. Emails are unique; a duplicate is a
//! [`StoreError::Conflict`].
//!
//! Every method may fail with [`StoreError::Unavailable`] when the backend
//! cannot be reached. The returned futures are `Send` so services built on
//! these traits can run inside multi-threaded HTTP handlers.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewNote, NewUser, Note, NoteChanges, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Async persistence contract for notes.
pub trait NoteStore: Send + Sync {
    fn insert(&self, note: NewNote) -> impl Future<Output = StoreResult<Note>> + Send;

    fn find_by_slug(&self, slug: &str) -> impl Future<Output = StoreResult<Note>> + Send;

    fn find_by_id(&self, id: Uuid) -> impl Future<Output = StoreResult<Note>> + Send;

    fn update(
        &self,
        id: Uuid,
        changes: NoteChanges,
    ) -> impl Future<Output = StoreResult<Note>> + Send;

    fn delete(&self, id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;

    fn exists_by_slug(&self, slug: &str) -> impl Future<Output = StoreResult<bool>> + Send;

    fn list_by_owner(&self, owner_id: Uuid)
        -> impl Future<Output = StoreResult<Vec<Note>>> + Send;
}

/// Async persistence contract for identities.
pub trait UserStore: Send + Sync {
    fn insert_user(&self, user: NewUser) -> impl Future<Output = StoreResult<User>> + Send;

    fn find_user_by_id(&self, id: Uuid) -> impl Future<Output = StoreResult<User>> + Send;

    fn find_user_by_email(&self, email: &str) -> impl Future<Output = StoreResult<User>> + Send;
}
