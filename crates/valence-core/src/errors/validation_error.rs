//! Ingestion errors.

use super::error_code::{self, ValenceErrorCode};

/// Errors raised while building or querying the component graph.
///
/// Ingestion never partially succeeds: the first offending component or edge
/// aborts the whole batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown component: {id}")]
    UnknownComponent { id: String },

    #[error("Edge {source_id} -> {target_id} references unknown component {missing}")]
    DanglingEdge {
        source_id: String,
        target_id: String,
        missing: String,
    },

    #[error("Self-loop on component {id}")]
    SelfLoop { id: String },

    #[error("Duplicate edge {source_id} -> {target_id}")]
    DuplicateEdge { source_id: String, target_id: String },

    #[error("Duplicate component id: {id}")]
    DuplicateComponent { id: String },

    #[error("Component id must not be empty")]
    EmptyComponentId,

    #[error("Invalid throughput {value} for component {id}: must be finite and >= 0")]
    InvalidThroughput { id: String, value: f64 },

    #[error("Attraction needs two distinct components, got {id} twice")]
    SameComponent { id: String },

    #[error("Malformed snapshot: {message}")]
    MalformedSnapshot { message: String },
}

impl ValenceErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedSnapshot { .. } => error_code::MALFORMED_SNAPSHOT,
            _ => error_code::VALIDATION_ERROR,
        }
    }
}
