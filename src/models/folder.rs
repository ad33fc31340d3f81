//! Folder model for organizing requests in the collection tree.

use super::id::IdGenerator;
use super::request::now_millis;
use serde::{Deserialize, Serialize};

/// A folder grouping requests (and other folders) in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderItem {
    /// Stable identifier referenced by `RequestItem::parent_id`.
    pub id: String,

    pub name: String,

    /// Parent folder id, or None at the root.
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Whether the folder is expanded in the tree view.
    #[serde(default = "default_expanded")]
    pub expanded: bool,

    /// Creation time, epoch milliseconds.
    pub created_at: i64,
}

fn default_expanded() -> bool {
    true
}

impl FolderItem {
    /// Creates a folder with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_generator(name, &super::id::UuidGenerator)
    }

    /// Creates a folder drawing the id from `ids`.
    pub fn with_generator(name: impl Into<String>, ids: &dyn IdGenerator) -> Self {
        Self {
            id: ids.generate(),
            name: name.into(),
            parent_id: None,
            expanded: true,
            created_at: now_millis(),
        }
    }
}

impl Default for FolderItem {
    fn default() -> Self {
        Self::new("New Folder")
    }
}
