//! Fan-out executor over the configured assessors.
//!
//! One task per assessor, joined in configuration order. Completion order is
//! nondeterministic; the returned list is not: entry `i` always belongs to
//! assessor `i`. Assessor failures and panics are converted to fail-safe
//! results at this boundary, so `run_all` itself never fails and never
//! returns fewer entries than there are assessors.

use futures::future;
use std::sync::Arc;

use crate::domain::assessment::{AssessmentRequest, AssessmentResult};
use crate::ports::Assessor;

/// Executes all configured assessors concurrently against one request.
pub struct AssessorPool {
    assessors: Vec<Arc<dyn Assessor>>,
}

impl AssessorPool {
    /// Creates a pool over an ordered assessor list.
    ///
    /// The list order is the output order of [`run_all`](Self::run_all) and
    /// therefore the synthesis evaluation order.
    pub fn new(assessors: Vec<Arc<dyn Assessor>>) -> Self {
        Self { assessors }
    }

    /// Number of configured assessors.
    pub fn assessor_count(&self) -> usize {
        self.assessors.len()
    }

    /// Runs every assessor against the request and joins all of them.
    ///
    /// Each assessor gets its own task and its own clone of the request, so
    /// a slow or blocking assessor cannot delay the others and assessors
    /// cannot communicate. The output always contains exactly one entry per
    /// configured assessor, in configuration order.
    pub async fn run_all(&self, request: &AssessmentRequest) -> Vec<AssessmentResult> {
        let (kinds, handles): (Vec<_>, Vec<_>) = self
            .assessors
            .iter()
            .map(|assessor| {
                let assessor = Arc::clone(assessor);
                let request = request.clone();
                let kind = assessor.kind();
                let handle = tokio::spawn(async move { assessor.assess(&request).await });
                (kind, handle)
            })
            .unzip();

        // Single join point; the zip keeps configuration order.
        let outcomes = future::join_all(handles).await;

        kinds
            .into_iter()
            .zip(outcomes)
            .map(|(kind, outcome)| match outcome {
                Ok(Ok(result)) => result,
                Ok(Err(err)) => {
                    tracing::warn!(assessor = %kind, error = %err, "assessor failed, using fail-safe result");
                    AssessmentResult::failed(kind, err.to_string())
                }
                Err(join_err) => {
                    let description = if join_err.is_panic() {
                        "assessor panicked".to_string()
                    } else {
                        format!("assessor task aborted: {join_err}")
                    };
                    tracing::error!(assessor = %kind, "{description}");
                    AssessmentResult::failed(kind, description)
                }
            })
            .collect()
    }
}
