use thiserror::Error;
use uuid::Uuid;

/// Failures of a single store operation. None of them leave partial state behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("assignment {id} not found")]
    NotFound { id: Uuid },

    #[error("grade {grade} is outside the allowed range 0-100")]
    InvalidGrade { grade: f64 },
}
