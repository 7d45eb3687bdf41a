use crate::storage::Persistence;
use crate::store::ChallengeStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to the single challenge store, passed to every handler.
pub struct AppState<P> {
    pub store: Arc<Mutex<ChallengeStore<P>>>,
}

impl<P: Persistence> AppState<P> {
    pub fn new(store: ChallengeStore<P>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
