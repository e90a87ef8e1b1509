//! # Tri-state update values
//!
//! JSON update payloads need three states per nullable field: the key is
//! missing (leave the stored value alone), the key is `null` (remove the
//! stored value), or the key carries a value (replace). A plain `Option`
//! folds the first two together, which for note passwords would silently
//! unlock a note whenever a client forgets to send the field.
//!
//! [`Patch`] keeps the three apart. Use it with `#[serde(default)]` so a
//! missing key deserializes to [`Patch::Unchanged`]:
//!
//! ```
//! use serde::Deserialize;
//! use store::Patch;
//!
//! #[derive(Deserialize)]
//! struct Update {
//!     #[serde(default)]
//!     password: Patch<String>,
//! }
//!
//! let omitted: Update = serde_json::from_str("{}").unwrap();
//! let cleared: Update = serde_json::from_str(r#"{"password":null}"#).unwrap();
//! assert_eq!(omitted.password, Patch::Unchanged);
//! assert_eq!(cleared.password, Patch::Cleared);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Unchanged,
    Set(T),
    Cleared,
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    /// Write the patch into an optional slot. `Unchanged` leaves it as is.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Patch::Unchanged => {}
            Patch::Set(value) => *slot = Some(value),
            Patch::Cleared => *slot = None,
        }
    }

    /// `None` for `Unchanged`, otherwise the new slot value.
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Patch::Unchanged => None,
            Patch::Set(value) => Some(Some(value)),
            Patch::Cleared => Some(None),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Set(value),
            None => Patch::Cleared,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// `Unchanged` serializes like `Cleared`; pair with
/// `skip_serializing_if = "Patch::is_unchanged"` to drop the key instead.
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(value) => serializer.serialize_some(value),
            Patch::Unchanged | Patch::Cleared => serializer.serialize_none(),
        }
    }
}
