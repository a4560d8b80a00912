//! The document contract every stored entity satisfies.

use uuid::Uuid;

/// A value that can live in a [`crate::memory::Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    /// The document's primary key.
    fn id(&self) -> Uuid;

    /// Called on every in-place update. Entities carrying an
    /// `updated_at` timestamp bump it here.
    fn touch(&mut self) {}
}
