//! Error types for engine operations.

use thiserror::Error;

use crate::model::PostType;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed color string (non-hex characters or wrong length).
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),

    /// Template id is not offered for the active post type.
    #[error("Unknown template {id:?} for post type {post_type}")]
    UnknownTemplate {
        /// The rejected template id.
        id: String,
        /// The post type the id was checked against.
        post_type: PostType,
    },

    /// An image source resolved to no decodable image.
    #[error("Missing asset: {0}")]
    MissingAsset(String),

    /// The persistence collaborator could not save a style mutation.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// The style state machine has not been initialized for a post.
    #[error("Canvas style not initialized")]
    NotInitialized,

    /// Fonts have not finished loading.
    #[error("Fonts are not ready")]
    FontsNotReady,

    /// Property record fails its invariants.
    #[error("Invalid property record: {0}")]
    InvalidProperty(String),

    /// Persisted style serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
