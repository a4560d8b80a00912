//! Group orchestration.

pub mod service;

pub use service::GroupService;
