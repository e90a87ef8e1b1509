//! Request and response shapes for the note operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::Patch;
use uuid::Uuid;

/// What a reader gets back for a note.
///
/// `content` is `None` (JSON `null`) while the note is locked, so a client can
/// tell "locked" apart from an empty note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub has_password: bool,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `create`. The owner never comes from the body; it is the
/// session identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    /// Leave out to get a generated slug.
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    pub content: String,
    /// Empty strings count as "no password".
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of `update`. Omitted fields stay as they are; `password: null`
/// removes the password.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub password: Patch<String>,
}

/// Body of `verifyPassword`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPassword {
    pub password: String,
}

/// Acknowledgement for update and delete.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub const fn ok() -> Self {
        Self { success: true }
    }
}
