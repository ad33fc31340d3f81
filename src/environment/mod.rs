//! Named environments and the active-environment selector.
//!
//! An environment is a named mapping from variable name to string value.
//! Multiple environments coexist; at most one is active at a time and is the
//! mapping the variable resolver consults. The store is process-lifetime
//! shared state: reads may happen concurrently from any number of resolver
//! snapshots, writes are serialized behind a lock, last write wins.

use crate::variables::Resolver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// Callback invoked after any mutation of the store.
pub type EnvironmentListener = Box<dyn Fn() + Send + Sync>;

/// Handle for unregistering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Serializable snapshot of the store contents.
///
/// This is the JSON shape persisted by callers; field and enum names round
/// trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    #[serde(default)]
    pub environments: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    pub active: Option<String>,
}

/// Shared store of named environments.
pub struct EnvironmentStore {
    state: RwLock<EnvironmentSnapshot>,
    listeners: Mutex<Vec<(u64, EnvironmentListener)>>,
    next_listener_id: Mutex<u64>,
}

impl EnvironmentStore {
    /// Creates an empty store with no active environment.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(EnvironmentSnapshot::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: Mutex::new(0),
        }
    }

    /// Returns a copy of all environments and their variables.
    pub fn environments(&self) -> HashMap<String, HashMap<String, String>> {
        self.state.read().unwrap().environments.clone()
    }

    /// Returns the active environment name, if any.
    pub fn active_environment(&self) -> Option<String> {
        self.state.read().unwrap().active.clone()
    }

    /// Sets (or clears) the active environment selector.
    pub fn set_active_environment(&self, name: Option<String>) {
        self.state.write().unwrap().active = name;
        self.notify_listeners();
    }

    /// Creates an empty environment. A name that already exists is left
    /// untouched and no notification fires.
    pub fn create_environment(&self, name: impl Into<String>) {
        let name = name.into();
        let created = {
            let mut state = self.state.write().unwrap();
            if state.environments.contains_key(&name) {
                false
            } else {
                state.environments.insert(name, HashMap::new());
                true
            }
        };
        if created {
            self.notify_listeners();
        }
    }

    /// Deletes an environment. Deleting the active environment clears the
    /// selector.
    pub fn delete_environment(&self, name: &str) {
        {
            let mut state = self.state.write().unwrap();
            state.environments.remove(name);
            if state.active.as_deref() == Some(name) {
                state.active = None;
            }
        }
        self.notify_listeners();
    }

    /// Sets a variable, creating the environment implicitly if needed.
    pub fn set_variable(
        &self,
        environment: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        {
            let mut state = self.state.write().unwrap();
            state
                .environments
                .entry(environment.into())
                .or_default()
                .insert(key.into(), value.into());
        }
        self.notify_listeners();
    }

    /// Removes a variable. Unknown environments and keys are no-ops.
    pub fn remove_variable(&self, environment: &str, key: &str) {
        {
            let mut state = self.state.write().unwrap();
            if let Some(variables) = state.environments.get_mut(environment) {
                variables.remove(key);
            }
        }
        self.notify_listeners();
    }

    /// Returns a copy of one environment's variables (empty if unknown).
    pub fn variables(&self, environment: &str) -> HashMap<String, String> {
        self.state
            .read()
            .unwrap()
            .environments
            .get(environment)
            .cloned()
            .unwrap_or_default()
    }

    /// Takes an immutable snapshot of the active environment's variables for
    /// use by the builder. With no active environment (or an unknown or empty
    /// one) the resolver passes text through unchanged.
    pub fn resolver(&self) -> Resolver {
        let state = self.state.read().unwrap();
        match state
            .active
            .as_ref()
            .and_then(|name| state.environments.get(name))
        {
            Some(variables) => Resolver::new(variables.clone()),
            None => Resolver::empty(),
        }
    }

    /// Resolves `{{name}}` placeholders against the active environment.
    pub fn resolve(&self, text: &str) -> String {
        self.resolver().resolve(text)
    }

    /// Registers a change listener, returning a handle for removal.
    pub fn add_listener(&self, listener: EnvironmentListener) -> ListenerId {
        let mut next = self.next_listener_id.lock().unwrap();
        let id = *next;
        *next += 1;
        self.listeners.lock().unwrap().push((id, listener));
        ListenerId(id)
    }

    /// Unregisters a previously added listener.
    pub fn remove_listener(&self, id: ListenerId) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|(existing, _)| *existing != id.0);
    }

    fn notify_listeners(&self) {
        let listeners = self.listeners.lock().unwrap();
        for (_, listener) in listeners.iter() {
            listener();
        }
    }

    /// Serializes the store contents to JSON.
    pub fn to_json(&self) -> String {
        let state = self.state.read().unwrap();
        serde_json::to_string(&*state).unwrap_or_else(|_| "{}".to_string())
    }

    /// Restores store contents from JSON. Corrupt input resets the store to
    /// empty rather than failing, so a damaged settings file never blocks
    /// startup.
    pub fn load_json(&self, json: &str) {
        let snapshot = match serde_json::from_str::<EnvironmentSnapshot>(json) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("discarding corrupt environment state: {}", err);
                EnvironmentSnapshot::default()
            }
        };
        *self.state.write().unwrap() = snapshot;
    }
}

impl Default for EnvironmentStore {
    fn default() -> Self {
        Self::new()
    }
}
