//! # taskhub-entity
//!
//! Domain entity models for TaskHub. Every struct in this crate
//! represents a stored document or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod folder;
pub mod group;
pub mod log;
pub mod record;
pub mod share;
pub mod task;
pub mod user;
