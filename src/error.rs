use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by the fallible `TreeMap` operations
///
/// The ordinary operations never fail: they report "already present" or "absent" through their
/// return values. Only operations that allocate with `try_` semantics can produce an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Space for another node could not be allocated. The map is left exactly as it was.
    #[error("failed to allocate space for a tree node")]
    AllocationFailed(#[from] TryReserveError),
}
