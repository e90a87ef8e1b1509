//! # API crate — note and account services for Slugnotes
//!
//! This crate holds everything the HTTP server calls into. It knows nothing
//! about axum or cookies: handlers in the `web` crate resolve the acting user
//! from the session and pass it in as an `Option<Uuid>`.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Local email + password accounts, Argon2 password hashing |
//! | [`db`] | PostgreSQL pool, migrations and the [`PgStore`] backend |
//! | [`error`] | [`ApiError`], the client-facing error taxonomy |
//! | [`models`] | Request and response bodies (`NoteView`, `CreateNote`, `UserInfo`, ...) |
//! | [`notes`] | [`NoteService`]: slug allocation, password gating, ownership checks |
//!
//! Both services are generic over the `store` traits, so tests run them
//! against [`store::MemoryStore`] and production against [`PgStore`].

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod notes;

pub use auth::AccountService;
pub use db::PgStore;
pub use error::{ApiError, ApiResult};
pub use models::{CreateNote, NoteView, Success, UpdateNote, UserInfo, VerifyPassword};
pub use notes::NoteService;
