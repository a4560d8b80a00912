//! Time-tracking record orchestration.

pub mod service;

pub use service::RecordService;
