//! Data models exchanged with clients.

mod note;
mod user;

pub use note::{CreateNote, NoteView, Success, UpdateNote, VerifyPassword};
pub use user::UserInfo;
