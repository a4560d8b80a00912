//! Sharing grants and polymorphic target references.

pub mod grant;
pub mod target;

pub use grant::{ShareGrant, SubjectKind};
pub use target::{TargetKind, TargetRef};
