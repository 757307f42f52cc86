//! Domain error type shared by every brushlog crate.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An owner or image row does not exist, or the image belongs to a
    /// different owner.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Write-path input rejected before it reaches the database.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A lookup failed in a way the caller cannot correct.
    #[error("Internal error: {0}")]
    Internal(String),
}
