//! Audit error types.
//!
//! Defined in `gradtrack-core` so callers (the CLI today, a request handler
//! tomorrow) can classify failures without string matching. Malformed input
//! data is deliberately *not* an error anywhere in the engine: bad credit
//! values coerce to zero and unknown section types degrade to an `unknown`
//! section result.

use thiserror::Error;

/// Errors that can occur when evaluating a student's progress.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The requested major key is not present in the catalog.
    #[error("major not found: {0}")]
    MajorNotFound(String),

    /// The requested college key is not present in the catalog.
    #[error("college not found: {0}")]
    CollegeNotFound(String),
}

impl AuditError {
    /// Returns `true` if this error was caused by the caller's input
    /// (an unknown lookup key) rather than by the engine itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuditError::MajorNotFound(_) | AuditError::CollegeNotFound(_)
        )
    }
}
