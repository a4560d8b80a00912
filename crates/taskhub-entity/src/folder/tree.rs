//! Folder tree structure for hierarchical display.

use serde::{Deserialize, Serialize};

use taskhub_core::types::{FolderId, TaskId};

use crate::share::ShareGrant;

/// A node in an expanded folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Tasks directly referencing this folder.
    pub tasks: Vec<TaskId>,
    /// Visibility grants on this folder.
    pub share_with: Vec<ShareGrant>,
    /// Child subtrees, in stored sibling order.
    pub subfolders: Vec<FolderNode>,
}

impl FolderNode {
    /// Total number of folders in this subtree, the node included.
    pub fn len(&self) -> usize {
        1 + self.subfolders.iter().map(FolderNode::len).sum::<usize>()
    }

    /// Whether the subtree consists of this node alone.
    pub fn is_empty(&self) -> bool {
        self.subfolders.is_empty()
    }
}
