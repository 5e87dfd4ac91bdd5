use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate {entity} name: {name}")]
    DuplicateName { entity: &'static str, name: String },

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether this error belongs to the input-validation family
    /// (empty or malformed input, duplicate names).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DuplicateName { .. })
    }
}

/// Failure reported by a store implementation.
///
/// `Backend` and `Poisoned` mean the mutation was not applied and surface as
/// [`CoreError::Transport`]. A unique-constraint violation is a duplicate,
/// not an outage, and a row the store cannot decode is an internal fault.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("unique constraint violated: {constraint}")]
    Conflict { constraint: String },

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { constraint } => CoreError::DuplicateName {
                entity: "Record",
                name: constraint,
            },
            StoreError::Corrupt(msg) => CoreError::Internal(msg),
            other => CoreError::Transport(other.to_string()),
        }
    }
}
