// Error types for task store operations

/// Result alias used by every `TaskStore` operation
pub type StoreResult<T> = Result<T, StoreError>;

/// Rejections raised by the task store
///
/// Each error is local to the requested operation: the store is left exactly
/// as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Title was empty or whitespace-only on add or update
    #[error("task title is required")]
    EmptyTitle,

    /// No task with this id exists (never created, or already deleted)
    #[error("task not found: {0}")]
    NotFound(u64),
}

impl StoreError {
    /// True for input rejections, false for lookups that missed
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::EmptyTitle)
    }
}
