//! Open-editor session tracking.
//!
//! Records which requests currently have an editor open, keyed by request
//! id. The session is an explicit object owned by the embedding UI layer,
//! not process-global state, so two windows can hold independent sessions.

use std::collections::HashSet;
use std::sync::Mutex;

/// Tracks the set of requests with an open editor.
#[derive(Debug, Default)]
pub struct EditorSession {
    open: Mutex<HashSet<String>>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a request's editor as open. Returns `true` when a new entry
    /// was created, `false` when the editor was already open (the caller
    /// focuses the existing editor instead of spawning another).
    pub fn open(&self, request_id: impl Into<String>) -> bool {
        self.open.lock().unwrap().insert(request_id.into())
    }

    /// Marks a request's editor as closed. Closing an id that is not open
    /// is a no-op.
    pub fn close(&self, request_id: &str) {
        self.open.lock().unwrap().remove(request_id);
    }

    pub fn is_open(&self, request_id: &str) -> bool {
        self.open.lock().unwrap().contains(request_id)
    }

    /// Ids of all requests with an open editor, in no particular order.
    pub fn open_ids(&self) -> Vec<String> {
        self.open.lock().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.open.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.lock().unwrap().is_empty()
    }
}
