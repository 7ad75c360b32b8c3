//! This module store the type for the collective state of the application.
use std::sync::{Arc, Mutex, RwLock};

use crate::{metrics::RequestCounter, notes::store::NoteStore};

/// The state handed to every handler.
pub type SharedState = Arc<AppState>;

/// The shared state for the application.
#[derive(Debug, Default)]
pub struct AppState {
    /// Every note held by this process.
    pub notes: RwLock<NoteStore>,
    /// Requests seen so far, labeled by HTTP method.
    pub metrics: Mutex<RequestCounter>,
}

impl AppState {
    /// Creates a new [`AppState`] with an empty store and zeroed counters.
    pub fn new() -> Self {
        AppState {
            notes: RwLock::new(NoteStore::new()),
            metrics: Mutex::new(RequestCounter::new()),
        }
    }

    /// Creates a new [`AppState`] ready to be shared between handlers.
    pub fn shared() -> SharedState {
        Arc::new(Self::new())
    }
}
