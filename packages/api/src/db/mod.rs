//! # Database module — PostgreSQL pool and store
//!
//! ## Design
//!
//! There is no process-wide pool. The web entry point builds one with
//! [`connect`] from its settings, runs [`migrate`], and hands it to
//! [`PgStore::new`]. The store is cheap to clone (it only holds the pool) and
//! is injected into the services that need it.
//!
//! ## Error mapping
//!
//! | sqlx error | [`store::StoreError`] |
//! |------------|-----------------------|
//! | `RowNotFound`, zero rows affected | `NotFound` |
//! | unique violation (`notes_slug_key`, `users_email_key`) | `Conflict` |
//! | I/O, TLS, pool timeout / closed, worker crash | `Unavailable` |
//! | anything else | `Backend` |

mod pg_store;
mod pool;

pub use pg_store::PgStore;
pub use pool::{connect, connect_lazy, migrate, PoolSettings};
