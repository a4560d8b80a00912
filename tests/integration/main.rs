//! Integration test harness: drives the full router over an in-memory
//! store, no external services required.

mod helpers;

mod auth_test;
mod hierarchy_test;
mod scope_test;
