//! # taskhub-api
//!
//! The HTTP surface of TaskHub. Thin by design: handlers translate
//! requests into service calls and wrap the results; every business
//! rule lives below in `taskhub-service`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use state::AppState;
