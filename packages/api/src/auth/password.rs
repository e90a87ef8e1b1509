//! # Password hashing and verification — Argon2id
//!
//! Used both for account logins and for note passwords:
//!
//! - [`hash_password`] — generates a random salt via [`OsRng`], hashes the plaintext
//!   password with the default Argon2id parameters (m=19456 KiB, t=2, p=1), and
//!   returns the result as a PHC-format string (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`).
//!   A fresh salt per call means the same plaintext never hashes to the same string.
//!
//! - [`verify_password`] — parses a PHC-format hash and checks whether the provided
//!   plaintext matches. Returns `Ok(true)` on success, `Ok(false)` on mismatch, or
//!   `Err` if the stored hash is malformed. The digest comparison inside `argon2` is
//!   constant-time.
//!
//! - [`verify_decoy`] — burns one verification against a fixed hash. Callers run it
//!   on lookup misses (unknown slug, unknown email) so that path costs as much as a
//!   wrong password. [`prepare_decoy`] builds that hash at startup.
//!
//! Hashing is CPU-bound. The `*_blocking` wrappers move the work onto
//! Tokio's blocking pool so request executors keep serving other requests.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{ApiError, ApiResult};

static DECOY_HASH: OnceLock<String> = OnceLock::new();

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn decoy_hash() -> Result<&'static str, String> {
    if let Some(hash) = DECOY_HASH.get() {
        return Ok(hash.as_str());
    }
    let hash = hash_password("slugnotes-decoy")?;
    Ok(DECOY_HASH.get_or_init(|| hash).as_str())
}

/// Build the decoy hash up front so the first lookup miss costs one
/// verification, not a hash plus a verification. Call once at startup.
pub fn prepare_decoy() -> Result<(), String> {
    decoy_hash().map(|_| ())
}

/// Run one verification against a fixed hash and discard the result.
pub fn verify_decoy(password: &str) {
    match decoy_hash() {
        Ok(hash) => {
            let _ = verify_password(password, hash);
        }
        Err(e) => tracing::warn!(error = %e, "failed to build decoy hash"),
    }
}

/// [`prepare_decoy`] on the blocking pool.
pub async fn prepare_decoy_blocking() -> ApiResult<()> {
    tokio::task::spawn_blocking(prepare_decoy)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::Internal)
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String) -> ApiResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::Internal)
}

/// [`verify_password`] on the blocking pool. A malformed stored hash is an
/// internal error, not a mismatch.
pub async fn verify_password_blocking(password: String, hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::Internal)
}

/// [`verify_decoy`] on the blocking pool.
pub async fn verify_decoy_blocking(password: String) {
    let _ = tokio::task::spawn_blocking(move || verify_decoy(&password)).await;
}
