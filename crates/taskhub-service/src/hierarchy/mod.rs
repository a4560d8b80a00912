//! The hierarchy engine: recursive tree assembly and cascading deletion.

pub mod delete;
pub mod tree;

pub use delete::Cascade;
pub use tree::TreeBuilder;
