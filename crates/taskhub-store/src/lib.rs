//! # taskhub-store
//!
//! The document store adapter. The real deployment target is a generic
//! document database with find/create/update/delete and reference
//! resolution; this crate models that boundary as an in-process
//! [`memory::Collection`] per entity, wrapped by typed stores that carry
//! the domain queries. Everything above this crate only sees the typed
//! stores, so swapping in a networked driver stays local to this crate.

pub mod document;
pub mod memory;
pub mod stores;

pub use document::Document;
pub use memory::Collection;
pub use stores::{FolderStore, GroupStore, LogStore, RecordStore, TaskStore, UserStore};
