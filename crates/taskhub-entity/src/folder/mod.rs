//! Folder domain entities.

pub mod model;
pub mod status;
pub mod tree;

pub use model::{CreateFolder, Folder, FolderKind, ProjectFields};
pub use status::ProjectStatus;
pub use tree::FolderNode;
