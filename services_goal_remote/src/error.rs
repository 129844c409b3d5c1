//! Remote write errors

use crate::wire::{MessageId, SchemaVersion};
use thiserror::Error;

/// Result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors a remote goal write can end with
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Endpoint rejected the write: {0}")]
    Rejected(String),

    #[error("Schema {received} is not compatible with {expected}")]
    SchemaMismatch {
        expected: SchemaVersion,
        received: SchemaVersion,
    },

    #[error("Response for {received} does not match request {expected}")]
    RequestMismatch {
        expected: MessageId,
        received: MessageId,
    },

    #[error("Write was abandoned before an outcome was reported")]
    Dropped,
}
