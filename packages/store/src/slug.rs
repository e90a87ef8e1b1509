//! # URL slugs
//!
//! A [`Slug`] is the external lookup key of a note. Parsing trims surrounding
//! whitespace and then requires 1..=[`MAX_SLUG_LEN`] characters drawn from
//! `A-Z a-z 0-9 - _`, so every slug can be dropped into a URL path segment
//! without escaping.
//!
//! [`Slug::generate`] produces a random [`GENERATED_SLUG_LEN`]-character
//! alphanumeric token for notes created without a chosen slug.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_SLUG_LEN: usize = 64;
pub const GENERATED_SLUG_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("slug must not be empty")]
    Empty,

    #[error("slug must be at most 64 characters")]
    TooLong,

    #[error("slug may only contain letters, digits, '-' and '_'")]
    InvalidCharacter,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn parse(candidate: &str) -> Result<Self, SlugError> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(SlugError::Empty);
        }
        if trimmed.chars().count() > MAX_SLUG_LEN {
            return Err(SlugError::TooLong);
        }
        if !trimmed.chars().all(is_slug_char) {
            return Err(SlugError::InvalidCharacter);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Random alphanumeric slug. Collisions are possible; callers retry.
    pub fn generate() -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_SLUG_LEN)
            .map(char::from)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}
