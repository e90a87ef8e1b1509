pub mod models;
pub mod patch;
pub mod repo;
pub mod slug;

mod memory;
pub use memory::MemoryStore;

pub use models::{LoginMethod, NewNote, NewUser, Note, NoteChanges, Role, User};
pub use patch::Patch;
pub use repo::{NoteStore, StoreError, StoreResult, UserStore};
pub use slug::{Slug, SlugError};
