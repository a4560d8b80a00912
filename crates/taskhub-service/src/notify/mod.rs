//! Outbound notification content builders.

pub mod emails;
pub mod slack;
