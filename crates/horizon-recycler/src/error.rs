//! Error types for the recycler dispatch layer.

use crate::view_type::ViewTypeId;

/// Result type alias for recycler operations.
pub type Result<T> = std::result::Result<T, RecyclerError>;

/// Errors that can occur while dispatching records to renderers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecyclerError {
    /// A view type reached display without a registered renderer factory.
    ///
    /// This is always an owner configuration bug: a record kind was placed
    /// in the sequence before its renderer was registered.
    #[error("no renderer factory registered for view type {view_type}")]
    RendererNotRegistered { view_type: ViewTypeId },

    /// A position was outside the bounds of the current record sequence.
    #[error("position {position} out of bounds for record sequence of length {len}")]
    IndexOutOfBounds { position: usize, len: usize },
}

impl RecyclerError {
    /// Create a lookup-miss error for an unregistered view type.
    pub fn not_registered(view_type: ViewTypeId) -> Self {
        Self::RendererNotRegistered { view_type }
    }

    /// Create an out-of-bounds error.
    pub fn out_of_bounds(position: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { position, len }
    }
}
