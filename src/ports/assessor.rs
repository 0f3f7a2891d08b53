//! Assessor Port - uniform capability interface for risk assessors.
//!
//! Every risk dimension implements the same `assess` contract so the pool's
//! fan-out/join logic stays identical whether an assessor is a pure rule
//! table or calls an external service internally.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assessment::{AssessmentRequest, AssessmentResult};
use crate::domain::foundation::AssessorKind;
use crate::ports::TextGenerationError;

/// One independent risk-assessment unit.
///
/// Implementations must not share mutable state with each other; the pool
/// hands each call its own view of the request.
#[async_trait]
pub trait Assessor: Send + Sync {
    /// The dimension this assessor covers.
    fn kind(&self) -> AssessorKind;

    /// Assesses one request.
    ///
    /// A returned error is converted to a fail-safe low-risk result at the
    /// pool boundary; implementations should not try to mask internal
    /// failures themselves.
    async fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResult, AssessorError>;
}

/// Failure inside one assessor.
#[derive(Debug, Error)]
pub enum AssessorError {
    /// The text generation collaborator failed.
    #[error("text generation failed: {0}")]
    Generation(#[from] TextGenerationError),

    /// Any other internal failure.
    #[error("{0}")]
    Internal(String),
}

impl AssessorError {
    /// Creates an internal error from a message.
    pub fn internal(message: impl Into<String>) -> Self {
        AssessorError::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_displays_bare_message() {
        let err = AssessorError::internal("rule table out of range");
        assert_eq!(err.to_string(), "rule table out of range");
    }

    #[test]
    fn generation_error_is_wrapped_with_context() {
        let err = AssessorError::from(TextGenerationError::unavailable("service down"));
        assert!(err.to_string().starts_with("text generation failed:"));
    }
}
