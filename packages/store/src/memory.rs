use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::models::{NewNote, NewUser, Note, NoteChanges, User};
use crate::repo::{NoteStore, StoreError, StoreResult, UserStore};

#[derive(Debug, Default)]
struct Notes {
    by_id: HashMap<Uuid, Note>,
    // slug -> id; the unique index
    slugs: HashMap<String, Uuid>,
}

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<Uuid, User>,
    emails: HashMap<String, Uuid>,
}

/// In-memory note and user store for testing and local development.
///
/// Slug and email uniqueness are enforced under the same lock as the insert,
/// so concurrent inserts of one slug admit exactly one winner.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    notes: Arc<Mutex<Notes>>,
    users: Arc<Mutex<Users>>,
    available: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            notes: Arc::default(),
            users: Arc::default(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the backend going away (or coming back). While unavailable
    /// every operation fails with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn note_count(&self) -> usize {
        self.notes.lock().map(|n| n.by_id.len()).unwrap_or_default()
    }

    fn notes(&self) -> StoreResult<MutexGuard<'_, Notes>> {
        self.check_available()?;
        self.notes
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn users(&self) -> StoreResult<MutexGuard<'_, Users>> {
        self.check_available()?;
        self.users
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        }
    }
}

impl NoteStore for MemoryStore {
    async fn insert(&self, note: NewNote) -> StoreResult<Note> {
        let mut notes = self.notes()?;
        if notes.slugs.contains_key(note.slug.as_str()) {
            return Err(StoreError::Conflict("slug"));
        }
        let note = Note::from_new(note);
        notes.slugs.insert(note.slug.clone(), note.id);
        notes.by_id.insert(note.id, note.clone());
        Ok(note)
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Note> {
        let notes = self.notes()?;
        notes
            .slugs
            .get(slug)
            .and_then(|id| notes.by_id.get(id))
            .cloned()
            .ok_or(StoreError::NotFound("note"))
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Note> {
        self.notes()?
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("note"))
    }

    async fn update(&self, id: Uuid, changes: NoteChanges) -> StoreResult<Note> {
        let mut notes = self.notes()?;
        let note = notes
            .by_id
            .get_mut(&id)
            .ok_or(StoreError::NotFound("note"))?;
        note.apply(changes);
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut notes = self.notes()?;
        let note = notes.by_id.remove(&id).ok_or(StoreError::NotFound("note"))?;
        notes.slugs.remove(&note.slug);
        Ok(())
    }

    async fn exists_by_slug(&self, slug: &str) -> StoreResult<bool> {
        Ok(self.notes()?.slugs.contains_key(slug))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Note>> {
        let notes = self.notes()?;
        let mut owned: Vec<Note> = notes
            .by_id
            .values()
            .filter(|n| n.owner_id == Some(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }
}

impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users()?;
        if users.emails.contains_key(&user.email) {
            return Err(StoreError::Conflict("user"));
        }
        let user = User::from_new(user);
        users.emails.insert(user.email.clone(), user.id);
        users.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<User> {
        self.users()?
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        let users = self.users()?;
        users
            .emails
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }
}
