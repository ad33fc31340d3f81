//! Saved-request collection store.
//!
//! Holds the tree of folders and requests plus a flat drafts area, with
//! change listeners for UI refresh and JSON persistence. Like the
//! environment store, reads hand out clones and writes are serialized
//! behind a lock.

use crate::models::folder::FolderItem;
use crate::models::request::RequestItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, RwLock};

/// Callback invoked after any mutation of the store.
pub type CollectionListener = Box<dyn Fn() + Send + Sync>;

/// Handle for unregistering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// One entry in the rendered collection tree.
///
/// A tagged enum rather than a node-with-nullable-fields, so consumers
/// match exhaustively and the drafts divider is a first-class case.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Folder(FolderItem),
    Request(RequestItem),
    /// Divider between the saved collection and the drafts area.
    DraftsMarker,
}

/// Errors from persisting the collection to disk.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StoreError::Json(err) => write!(f, "Storage serialization error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

/// The serializable collection contents: the saved tree plus drafts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub folders: Vec<FolderItem>,
    #[serde(default)]
    pub requests: Vec<RequestItem>,
    #[serde(default)]
    pub drafts: Vec<RequestItem>,
}

impl Collection {
    /// Looks a request up by id in the saved tree, then in drafts.
    pub fn get_request(&self, id: &str) -> Option<&RequestItem> {
        self.requests
            .iter()
            .find(|r| r.id == id)
            .or_else(|| self.drafts.iter().find(|r| r.id == id))
    }

    pub fn get_folder(&self, id: &str) -> Option<&FolderItem> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Requests directly inside a folder (`None` for the root level).
    pub fn requests_in_folder(&self, folder_id: Option<&str>) -> Vec<&RequestItem> {
        self.requests
            .iter()
            .filter(|r| r.parent_id.as_deref() == folder_id)
            .collect()
    }

    /// Folders directly inside a folder (`None` for the root level).
    pub fn sub_folders(&self, folder_id: Option<&str>) -> Vec<&FolderItem> {
        self.folders
            .iter()
            .filter(|f| f.parent_id.as_deref() == folder_id)
            .collect()
    }
}

/// Shared store wrapping a [`Collection`] with listeners and persistence.
pub struct CollectionStore {
    state: RwLock<Collection>,
    listeners: Mutex<Vec<(u64, CollectionListener)>>,
    next_listener_id: Mutex<u64>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Collection::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: Mutex::new(0),
        }
    }

    /// Returns a copy of the full collection contents.
    pub fn snapshot(&self) -> Collection {
        self.state.read().unwrap().clone()
    }

    pub fn get_request(&self, id: &str) -> Option<RequestItem> {
        self.state.read().unwrap().get_request(id).cloned()
    }

    pub fn get_folder(&self, id: &str) -> Option<FolderItem> {
        self.state.read().unwrap().get_folder(id).cloned()
    }

    /// Adds a request to the saved tree.
    pub fn add_request(&self, request: RequestItem) {
        self.state.write().unwrap().requests.push(request);
        self.notify_listeners();
    }

    /// Adds a request to the drafts area.
    pub fn add_draft(&self, request: RequestItem) {
        self.state.write().unwrap().drafts.push(request);
        self.notify_listeners();
    }

    /// Replaces a request (saved or draft) by id, refreshing its
    /// modification timestamp. Unknown ids are ignored.
    pub fn update_request(&self, request: RequestItem) {
        let mut updated = request;
        updated.touch();
        {
            let mut state = self.state.write().unwrap();
            if let Some(existing) = state.requests.iter_mut().find(|r| r.id == updated.id) {
                *existing = updated;
            } else if let Some(existing) = state.drafts.iter_mut().find(|r| r.id == updated.id) {
                *existing = updated;
            } else {
                return;
            }
        }
        self.notify_listeners();
    }

    /// Removes a request by id from the saved tree or drafts.
    pub fn remove_request(&self, id: &str) {
        {
            let mut state = self.state.write().unwrap();
            state.requests.retain(|r| r.id != id);
            state.drafts.retain(|r| r.id != id);
        }
        self.notify_listeners();
    }

    pub fn add_folder(&self, folder: FolderItem) {
        self.state.write().unwrap().folders.push(folder);
        self.notify_listeners();
    }

    /// Removes a folder. Its direct children (folders and requests) are
    /// re-parented to the root rather than deleted.
    pub fn remove_folder(&self, id: &str) {
        {
            let mut state = self.state.write().unwrap();
            state.folders.retain(|f| f.id != id);
            for folder in state.folders.iter_mut() {
                if folder.parent_id.as_deref() == Some(id) {
                    folder.parent_id = None;
                }
            }
            for request in state.requests.iter_mut() {
                if request.parent_id.as_deref() == Some(id) {
                    request.parent_id = None;
                }
            }
        }
        self.notify_listeners();
    }

    pub fn rename_folder(&self, id: &str, name: impl Into<String>) {
        let name = name.into();
        {
            let mut state = self.state.write().unwrap();
            match state.folders.iter_mut().find(|f| f.id == id) {
                Some(folder) => folder.name = name,
                None => return,
            }
        }
        self.notify_listeners();
    }

    pub fn set_folder_expanded(&self, id: &str, expanded: bool) {
        {
            let mut state = self.state.write().unwrap();
            match state.folders.iter_mut().find(|f| f.id == id) {
                Some(folder) => folder.expanded = expanded,
                None => return,
            }
        }
        self.notify_listeners();
    }

    /// Moves a saved request into the drafts area, detaching it from its
    /// folder. Unknown ids are ignored.
    pub fn move_to_drafts(&self, id: &str) {
        {
            let mut state = self.state.write().unwrap();
            let Some(index) = state.requests.iter().position(|r| r.id == id) else {
                return;
            };
            let mut request = state.requests.remove(index);
            request.parent_id = None;
            state.drafts.push(request);
        }
        self.notify_listeners();
    }

    /// Promotes a draft into the saved tree under the given folder.
    pub fn move_to_collection(&self, id: &str, folder_id: Option<String>) {
        {
            let mut state = self.state.write().unwrap();
            let Some(index) = state.drafts.iter().position(|r| r.id == id) else {
                return;
            };
            let mut request = state.drafts.remove(index);
            request.parent_id = folder_id;
            state.requests.push(request);
        }
        self.notify_listeners();
    }

    /// Renders the root level of the collection tree: folders, then loose
    /// requests, then the drafts divider and drafts when any exist.
    pub fn root_nodes(&self) -> Vec<TreeNode> {
        let state = self.state.read().unwrap();
        let mut nodes = Vec::new();
        for folder in state.sub_folders(None) {
            nodes.push(TreeNode::Folder(folder.clone()));
        }
        for request in state.requests_in_folder(None) {
            nodes.push(TreeNode::Request(request.clone()));
        }
        if !state.drafts.is_empty() {
            nodes.push(TreeNode::DraftsMarker);
            for draft in &state.drafts {
                nodes.push(TreeNode::Request(draft.clone()));
            }
        }
        nodes
    }

    /// Renders the contents of one folder: sub-folders, then requests.
    pub fn child_nodes(&self, folder_id: &str) -> Vec<TreeNode> {
        let state = self.state.read().unwrap();
        let mut nodes = Vec::new();
        for folder in state.sub_folders(Some(folder_id)) {
            nodes.push(TreeNode::Folder(folder.clone()));
        }
        for request in state.requests_in_folder(Some(folder_id)) {
            nodes.push(TreeNode::Request(request.clone()));
        }
        nodes
    }

    /// Registers a change listener, returning a handle for removal.
    pub fn add_listener(&self, listener: CollectionListener) -> ListenerId {
        let mut next = self.next_listener_id.lock().unwrap();
        let id = *next;
        *next += 1;
        self.listeners.lock().unwrap().push((id, listener));
        ListenerId(id)
    }

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

    /// Serializes the collection to JSON.
    pub fn to_json(&self) -> String {
        let state = self.state.read().unwrap();
        serde_json::to_string(&*state).unwrap_or_else(|_| "{}".to_string())
    }

    /// Restores collection contents from JSON. Corrupt input resets the
    /// store to empty rather than failing.
    pub fn load_json(&self, json: &str) {
        let collection = match serde_json::from_str::<Collection>(json) {
            Ok(collection) => collection,
            Err(err) => {
                log::warn!("discarding corrupt collection state: {}", err);
                Collection::default()
            }
        };
        *self.state.write().unwrap() = collection;
    }

    /// Writes the collection to a file as pretty-printed JSON, creating
    /// parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = {
            let state = self.state.read().unwrap();
            serde_json::to_string_pretty(&*state)?
        };
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads the collection from a file. A missing file leaves the store
    /// empty; corrupt contents reset it to empty with a warning.
    pub fn load_from(&self, path: &Path) -> Result<(), StoreError> {
        if !path.exists() {
            *self.state.write().unwrap() = Collection::default();
            return Ok(());
        }
        let json = std::fs::read_to_string(path)?;
        self.load_json(&json);
        Ok(())
    }
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new()
    }
}
