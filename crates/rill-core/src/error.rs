//! Error types for the Rill core.
//!
//! Stream failures are not represented here: they travel through the
//! `Error` case of [`Event`](crate::Event) with whatever failure type the
//! producer chose. This module only covers misuse of the core's own handles.

use thiserror::Error;

// =============================================================================
// Disposal Errors
// =============================================================================

/// Errors raised by disposable containers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisposeError {
    /// A set-once slot received a second resource.
    #[error("disposable has already been assigned")]
    AlreadyAssigned,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for disposable operations.
pub type DisposeResult<T> = Result<T, DisposeError>;
