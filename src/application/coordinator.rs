//! Coordinator - the only component that sequences cross-component calls.
//!
//! One request flows memory retrieval → concurrent fan-out → pure synthesis
//! → best-effort storage. The coordinator returns a complete report even
//! under partial assessor failure; memory trouble is logged and swallowed.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::pool::AssessorPool;
use crate::domain::assessment::{
    AssessmentDetails, AssessmentRequest, AssessmentResult, MemoryHit, StoredExperience,
    SynthesisVerdict,
};
use crate::domain::foundation::{AssessorKind, ExperienceId, RiskLevel, Timestamp, UserId};
use crate::domain::synthesis::SynthesisEngine;
use crate::ports::MemoryGateway;

/// How many relevant hits one request consults.
pub const MEMORY_TOP_K: usize = 5;
/// How many hits a user summary scans.
const SUMMARY_TOP_K: usize = 20;
/// How many hits the report echoes back to the caller.
const REPORT_HIT_PREVIEW: usize = 3;

/// The complete, serializable outcome of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// When the request was processed.
    pub timestamp: Timestamp,
    /// User the request belongs to.
    pub user_id: UserId,
    /// The user's message.
    pub message: String,
    /// One entry per configured assessor, in configuration order. Degraded
    /// assessors appear here with their `error` field set.
    pub assessments: Vec<AssessmentResult>,
    /// Snapshot of the memory consultation.
    pub memory: MemorySnapshot,
    /// The merged verdict.
    pub synthesis: SynthesisVerdict,
    /// Id of the stored experience, when storage succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_id: Option<ExperienceId>,
}

/// What the memory gateway contributed to one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Number of relevant hits found.
    pub relevant_count: usize,
    /// First few hits, for display.
    #[serde(default)]
    pub recent: Vec<MemoryHit>,
}

/// Aggregate view over a user's stored history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserHealthSummary {
    pub user_id: UserId,
    pub period_days: u32,
    pub total_interactions: usize,
}

/// Top-level orchestrator.
///
/// Holds its collaborators by explicit injection; nothing here reaches for
/// ambient global state.
pub struct Coordinator {
    memory: Arc<dyn MemoryGateway>,
    pool: AssessorPool,
}

impl Coordinator {
    /// Creates a coordinator over a memory gateway and an assessor pool.
    pub fn new(memory: Arc<dyn MemoryGateway>, pool: AssessorPool) -> Self {
        Self { memory, pool }
    }

    /// Processes one request end to end.
    ///
    /// Infallible by design: assessor failures surface as degraded entries
    /// inside the report, memory failures degrade to an empty hit list or a
    /// missing experience id, and the synthesis step is pure and total.
    pub async fn handle(&self, request: AssessmentRequest) -> HealthReport {
        let hits = match self
            .memory
            .retrieve(&request.user_id, &request.message, MEMORY_TOP_K)
            .await
        {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(error = %err, "memory retrieval failed, continuing without hits");
                Vec::new()
            }
        };

        let assessments = self.pool.run_all(&request).await;
        let synthesis = SynthesisEngine::merge(&assessments, &hits);

        let experience = Self::compose_experience(&request, &assessments, &synthesis);
        let experience_id = match self.memory.store(experience).await {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(error = %err, "experience storage failed, verdict returned anyway");
                None
            }
        };

        let relevant_count = hits.len();
        let mut recent = hits;
        recent.truncate(REPORT_HIT_PREVIEW);

        HealthReport {
            timestamp: Timestamp::now(),
            user_id: request.user_id,
            message: request.message,
            assessments,
            memory: MemorySnapshot {
                relevant_count,
                recent,
            },
            synthesis,
            experience_id,
        }
    }

    /// Summarizes a user's stored history over the given window.
    pub async fn user_summary(&self, user_id: &UserId, days: u32) -> UserHealthSummary {
        let hits = match self
            .memory
            .retrieve(user_id, "health summary", SUMMARY_TOP_K)
            .await
        {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(error = %err, "memory retrieval failed, summary will be empty");
                Vec::new()
            }
        };

        UserHealthSummary {
            user_id: user_id.clone(),
            period_days: days,
            total_interactions: hits.len(),
        }
    }

    fn compose_experience(
        request: &AssessmentRequest,
        assessments: &[AssessmentResult],
        synthesis: &SynthesisVerdict,
    ) -> StoredExperience {
        let mental = assessments
            .iter()
            .find(|r| r.kind == AssessorKind::Mental && !r.is_degraded());

        let response = mental.and_then(|r| match &r.details {
            AssessmentDetails::Mental { response, .. } => response.clone(),
            _ => None,
        });
        let risk_level: Option<RiskLevel> = mental.map(|r| r.risk_level);

        StoredExperience::new(
            request.user_id.clone(),
            &request.message,
            response,
            risk_level,
            synthesis.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::adapters::memory::InMemoryMemoryStore;
    use crate::domain::foundation::OverallStatus;
    use crate::ports::{Assessor, AssessorError, MemoryError};

    struct FixedAssessor(AssessorKind, RiskLevel);

    #[async_trait]
    impl Assessor for FixedAssessor {
        fn kind(&self) -> AssessorKind {
            self.0
        }

        async fn assess(
            &self,
            _request: &AssessmentRequest,
        ) -> Result<AssessmentResult, AssessorError> {
            Ok(AssessmentResult::new(self.0, self.1, 0.9).with_details(
                AssessmentDetails::Mental {
                    response: Some("响应".to_string()),
                    signals: Vec::new(),
                },
            ))
        }
    }

    /// Memory gateway that fails every call.
    struct BrokenMemory;

    #[async_trait]
    impl MemoryGateway for BrokenMemory {
        async fn retrieve(
            &self,
            _user_id: &UserId,
            _query: &str,
            _top_k: usize,
        ) -> Result<Vec<MemoryHit>, MemoryError> {
            Err(MemoryError::storage("read failed"))
        }

        async fn store(
            &self,
            _experience: StoredExperience,
        ) -> Result<ExperienceId, MemoryError> {
            Err(MemoryError::storage("write failed"))
        }
    }

    fn pool(level: RiskLevel) -> AssessorPool {
        AssessorPool::new(vec![Arc::new(FixedAssessor(AssessorKind::Mental, level))])
    }

    fn request() -> AssessmentRequest {
        AssessmentRequest::new(UserId::new("u1").unwrap(), "最近压力很大")
    }

    #[tokio::test]
    async fn report_carries_verdict_and_experience_id() {
        let memory = Arc::new(InMemoryMemoryStore::new());
        let coordinator = Coordinator::new(memory, pool(RiskLevel::Low));

        let report = coordinator.handle(request()).await;

        assert_eq!(report.assessments.len(), 1);
        assert_eq!(report.synthesis.overall_status, OverallStatus::Good);
        assert!(report.experience_id.is_some());
        assert_eq!(report.memory.relevant_count, 0);
    }

    #[tokio::test]
    async fn broken_memory_never_fails_the_request() {
        let coordinator = Coordinator::new(Arc::new(BrokenMemory), pool(RiskLevel::High));

        let report = coordinator.handle(request()).await;

        // Verdict still computed, storage id simply absent.
        assert_eq!(report.synthesis.overall_status, OverallStatus::Critical);
        assert!(report.experience_id.is_none());
        assert_eq!(report.memory.relevant_count, 0);
    }

    #[tokio::test]
    async fn stored_experience_feeds_later_retrieval() {
        let memory = Arc::new(InMemoryMemoryStore::new());
        let coordinator = Coordinator::new(memory, pool(RiskLevel::Low));

        coordinator.handle(request()).await;
        let second = coordinator.handle(request()).await;

        // The first turn is now a relevant hit for the identical message.
        assert_eq!(second.memory.relevant_count, 1);
        assert!(second
            .synthesis
            .insights
            .iter()
            .any(|i| i.contains("1条相关经验")));
    }

    #[tokio::test]
    async fn user_summary_counts_interactions() {
        let memory = Arc::new(InMemoryMemoryStore::new());
        let coordinator = Coordinator::new(memory, pool(RiskLevel::Low));

        let user = UserId::new("u1").unwrap();
        let before = coordinator.user_summary(&user, 30).await;
        assert_eq!(before.total_interactions, 0);

        coordinator
            .handle(AssessmentRequest::new(user.clone(), "做个 health summary 吧"))
            .await;

        let after = coordinator.user_summary(&user, 30).await;
        assert_eq!(after.period_days, 30);
        assert_eq!(after.total_interactions, 1);
    }
}
