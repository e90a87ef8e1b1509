//! # Domain models for notes and identities
//!
//! Defines the records handed across the [`crate::NoteStore`] and
//! [`crate::UserStore`] seams. These are the storage-side shapes: a [`Note`]
//! still carries its password hash and a [`User`] its login secret. The `api`
//! crate projects both into client-safe views before anything leaves the
//! server.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Note`] | A persisted note. `password_hash` present means the note is locked. |
//! | [`NewNote`] | What the allocator hands to `insert`: a validated slug and an already-hashed password. |
//! | [`NoteChanges`] | Partial replacement applied by `update`. The password hash is a [`Patch`] so "leave alone" and "remove" stay distinct. |
//! | [`User`] / [`NewUser`] | Identities that can own notes. |
//! | [`Role`] / [`LoginMethod`] | Tags stored as text next to each user. |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::patch::Patch;
use crate::slug::Slug;

/// A note as stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    /// PHC-format hash, never the plaintext.
    pub password_hash: Option<String>,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Build a fresh record with a new id and both timestamps set to now.
    pub fn from_new(new: NewNote) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: new.slug.into_string(),
            title: new.title,
            content: new.content,
            password_hash: new.password_hash,
            owner_id: new.owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place and refresh `updated_at`.
    pub fn apply(&mut self, changes: NoteChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        changes.password_hash.apply_to(&mut self.password_hash);
        self.updated_at = Utc::now();
    }
}

/// Insert payload for a note.
#[derive(Clone, Debug)]
pub struct NewNote {
    pub slug: Slug,
    pub title: String,
    pub content: String,
    pub password_hash: Option<String>,
    pub owner_id: Option<Uuid>,
}

/// Partial field replacement for a note.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub password_hash: Patch<String>,
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.password_hash.is_unchanged()
    }
}

/// Role tag of an identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// How an identity signs in. Only `local` accounts are created here, but
/// rows written by other tooling keep their tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoginMethod {
    #[default]
    Local,
    Other(String),
}

impl LoginMethod {
    pub fn as_str(&self) -> &str {
        match self {
            LoginMethod::Local => "local",
            LoginMethod::Other(tag) => tag,
        }
    }
}

impl From<String> for LoginMethod {
    fn from(value: String) -> Self {
        if value == "local" {
            LoginMethod::Local
        } else {
            LoginMethod::Other(value)
        }
    }
}

/// A stored identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub login_method: LoginMethod,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn from_new(new: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            role: new.role,
            login_method: new.login_method,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Insert payload for an identity.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub login_method: LoginMethod,
    pub password_hash: Option<String>,
}
