//! The synthesized verdict.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssessorKind, OverallStatus};

/// Single merged output of one request.
///
/// Built once per request by the synthesis engine and never mutated after
/// construction. Lists are concatenated in assessor-evaluation order and are
/// deliberately not deduplicated; display layers show a capped prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SynthesisVerdict {
    /// Merged overall status.
    pub overall_status: OverallStatus,
    /// Assessors that drove escalation, in evaluation order.
    #[serde(default)]
    pub priority: Vec<AssessorKind>,
    /// Concatenated recommendations, including the closing recommendation.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Concatenated warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Concatenated insights.
    #[serde(default)]
    pub insights: Vec<String>,
}

impl SynthesisVerdict {
    /// Creates an empty verdict with `good` status.
    pub fn new() -> Self {
        Self::default()
    }
}
