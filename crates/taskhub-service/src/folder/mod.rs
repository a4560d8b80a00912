//! Folder and project orchestration.

pub mod service;

pub use service::FolderService;
