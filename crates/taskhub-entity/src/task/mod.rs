//! Task domain entities.

pub mod importance;
pub mod model;
pub mod status;
pub mod tree;

pub use importance::TaskImportance;
pub use model::{CreateTask, Task};
pub use status::TaskStatus;
pub use tree::TaskNode;
