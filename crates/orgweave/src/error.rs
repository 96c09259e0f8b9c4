//! Error types for the orgweave graph engine.

use thiserror::Error;

/// Engine result type.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur in graph operations.
///
/// The set is closed: every failure surfaced by the engine, the state
/// service, or the tool dispatcher maps onto exactly one of these kinds,
/// and the wire adapters serialise the kind name verbatim.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// Entity or relationship id unknown.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Relationship type unknown, or source/target kinds outside the
    /// declared domain/range.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Bad field value, bad id format, out-of-range number, or missing
    /// required field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An entity or relationship with this id already exists.
    #[error("Id collision: {0}")]
    IdCollision(String),

    /// Temporal invariant violated (updated_at before created_at, or a
    /// timestamp in the future).
    #[error("Temporal violation: {0}")]
    Temporal(String),

    /// Tool invoked before any graph was loaded.
    #[error("No graph loaded")]
    NoGraphLoaded,

    /// A batch write failed; no mutation was applied. Carries one error
    /// string per failing item, prefixed with the item index.
    #[error("Batch rejected: {} item(s) failed", errors.len())]
    BatchRejected { errors: Vec<BatchItemError> },

    /// File write, rename, or parse failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The backend cannot provide a requested analytic.
    #[error("Unsupported by backend: {0}")]
    Unsupported(String),

    /// Programmer error; caught at the dispatcher boundary and surfaced
    /// generically.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// One failing item in a rejected batch.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchItemError {
    /// Zero-based index of the failing item in the submitted batch.
    pub index: usize,
    /// Error kind name for the item failure.
    pub kind: String,
    /// Human-readable failure description.
    pub message: String,
}

impl GraphError {
    /// Stable lowercase kind name used on the wire (ATP and REST).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GraphError::NotFound(_) => "not_found",
            GraphError::SchemaViolation(_) => "schema_violation",
            GraphError::Validation(_) => "validation",
            GraphError::IdCollision(_) => "validation",
            GraphError::Temporal(_) => "validation",
            GraphError::NoGraphLoaded => "no_graph_loaded",
            GraphError::BatchRejected { .. } => "batch_rejected",
            GraphError::Persistence(_) => "persistence",
            GraphError::Unsupported(_) => "unsupported",
            GraphError::Internal(_) => "internal",
        }
    }

    /// Message safe to return over a transport: never echoes raw user
    /// input for internal failures, and folds batch item detail into the
    /// single message string the wire format allows.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            GraphError::Internal(_) => "internal error".to_string(),
            GraphError::BatchRejected { errors } => {
                let detail: Vec<String> = errors
                    .iter()
                    .take(10)
                    .map(|e| format!("item {}: {}", e.index, e.message))
                    .collect();
                let suffix = if errors.len() > 10 {
                    format!(" (and {} more)", errors.len() - 10)
                } else {
                    String::new()
                };
                format!("Batch rejected: {}{suffix}", detail.join("; "))
            }
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Persistence(format!("JSON: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::NotFound("sys-1".to_string());
        assert_eq!(err.to_string(), "Not found: sys-1");

        let err = GraphError::SchemaViolation("governs: person -> system".to_string());
        assert!(err.to_string().contains("Schema violation"));
    }

    #[test]
    fn test_kind_names_are_wire_stable() {
        assert_eq!(GraphError::NotFound(String::new()).kind(), "not_found");
        assert_eq!(GraphError::NoGraphLoaded.kind(), "no_graph_loaded");
        assert_eq!(
            GraphError::BatchRejected { errors: vec![] }.kind(),
            "batch_rejected"
        );
        assert_eq!(GraphError::Unsupported(String::new()).kind(), "unsupported");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = GraphError::Internal("index out of bounds at weaver.rs:42".to_string());
        assert_eq!(err.public_message(), "internal error");
        // The full message stays available for logs.
        assert!(err.to_string().contains("weaver.rs"));
    }

    #[test]
    fn test_batch_rejected_counts_items() {
        let err = GraphError::BatchRejected {
            errors: vec![
                BatchItemError {
                    index: 1,
                    kind: "validation".to_string(),
                    message: "weight out of range".to_string(),
                },
                BatchItemError {
                    index: 3,
                    kind: "not_found".to_string(),
                    message: "unknown target".to_string(),
                },
            ],
        };
        assert!(err.to_string().contains("2 item(s)"));
        let message = err.public_message();
        assert!(message.contains("item 1: weight out of range"));
        assert!(message.contains("item 3: unknown target"));
    }

    #[test]
    fn test_io_error_maps_to_persistence() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = GraphError::from(io);
        assert!(matches!(err, GraphError::Persistence(_)));
    }
}
