//! Comments and the activity log.

pub mod service;

pub use service::CommentService;
