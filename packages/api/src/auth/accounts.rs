//! # Local email + password accounts
//!
//! [`AccountService`] gives the ownership model its acting identities:
//!
//! - [`register`](AccountService::register) — normalises the email (trimmed,
//!   lower-cased), requires a name and a password of at least
//!   [`MIN_PASSWORD_LEN`] characters, hashes the password and stores the user
//!   with role `user` and login method `local`. A taken email is a `Conflict`.
//! - [`login`](AccountService::login) — looks the user up by email and verifies
//!   the password. Unknown email, accounts without a local password and wrong
//!   passwords all produce the same `Unauthorized` message; the unknown-email
//!   path runs a decoy verification so it is not measurably faster.
//! - [`current_user`](AccountService::current_user) — resolves the user id held
//!   in a session. A stale id (user deleted since) resolves to `None`.

use store::{LoginMethod, NewUser, Role, StoreError, UserStore};
use uuid::Uuid;

use super::password::{hash_password_blocking, verify_decoy_blocking, verify_password_blocking};
use crate::error::{ApiError, ApiResult};
use crate::models::UserInfo;

pub const MIN_PASSWORD_LEN: usize = 8;

const INVALID_LOGIN: &str = "Invalid email or password";

#[derive(Clone, Debug)]
pub struct AccountService<S> {
    store: S,
}

impl<S: UserStore> AccountService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ApiResult<UserInfo> {
        let email = email.trim().to_lowercase();
        let name = name.trim().to_string();

        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::Invalid("Invalid email address".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Invalid(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if name.is_empty() {
            return Err(ApiError::Invalid("Name is required".to_string()));
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;

        let user = self
            .store
            .insert_user(NewUser {
                name,
                email,
                role: Role::User,
                login_method: LoginMethod::Local,
                password_hash: Some(password_hash),
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    ApiError::Conflict("An account with this email already exists".to_string())
                }
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, "registered account");
        Ok(UserInfo::from(&user))
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserInfo> {
        let email = email.trim().to_lowercase();

        let user = match self.store.find_user_by_email(&email).await {
            Ok(user) => user,
            Err(StoreError::NotFound(_)) => {
                verify_decoy_blocking(password.to_string()).await;
                return Err(ApiError::Unauthorized(INVALID_LOGIN.to_string()));
            }
            Err(other) => return Err(other.into()),
        };

        let Some(hash) = user.password_hash.clone() else {
            verify_decoy_blocking(password.to_string()).await;
            return Err(ApiError::Unauthorized(INVALID_LOGIN.to_string()));
        };

        if !verify_password_blocking(password.to_string(), hash).await? {
            tracing::info!(user_id = %user.id, "rejected login");
            return Err(ApiError::Unauthorized(INVALID_LOGIN.to_string()));
        }

        Ok(UserInfo::from(&user))
    }

    pub async fn current_user(&self, user_id: Uuid) -> ApiResult<Option<UserInfo>> {
        match self.store.find_user_by_id(user_id).await {
            Ok(user) => Ok(Some(UserInfo::from(&user))),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }
}
