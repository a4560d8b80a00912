//! Time-tracking record entities.

pub mod model;

pub use model::Record;
