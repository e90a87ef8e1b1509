use api::{AccountService, NoteService};
use store::{NoteStore, UserStore};

/// Everything a store must provide to back the router.
pub trait AppStore: NoteStore + UserStore + Clone + Send + Sync + 'static {}

impl<S> AppStore for S where S: NoteStore + UserStore + Clone + Send + Sync + 'static {}

/// Shared router state. Both services wrap clones of the same store.
#[derive(Clone)]
pub struct AppState<S> {
    pub notes: NoteService<S>,
    pub accounts: AccountService<S>,
}

impl<S: AppStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            notes: NoteService::new(store.clone()),
            accounts: AccountService::new(store),
        }
    }
}
