//! Ordered risk and status enumerations.
//!
//! These are the closed sets the synthesis rules are written against. All
//! three derive `Ord` so escalation logic can compare severities directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level reported by a single assessor.
///
/// Ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No noteworthy risk. Also the fail-safe value for failed assessors.
    #[default]
    Low,
    /// Elevated risk worth attention.
    Medium,
    /// High risk requiring escalation.
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

/// Overall status of a synthesized verdict.
///
/// Ordered from least to most severe; a merge only ever moves it upward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    /// Nothing requires action.
    #[default]
    Good,
    /// At least one dimension needs the user's attention.
    AttentionNeeded,
    /// A high mental-health risk was detected.
    Critical,
}

impl OverallStatus {
    /// Raises the status to `target` if it is more severe.
    ///
    /// Escalation is monotonic: a merge can never lower the status.
    pub fn escalate_to(&mut self, target: OverallStatus) {
        if target > *self {
            *self = target;
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverallStatus::Good => "good",
            OverallStatus::AttentionNeeded => "attention_needed",
            OverallStatus::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// The closed set of assessor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessorKind {
    /// Mental-health risk assessor.
    Mental,
    /// Physical-injury risk assessor.
    Physical,
    /// Economic-accessibility risk assessor.
    Economic,
}

impl AssessorKind {
    /// Fixed evaluation order of the synthesis step.
    ///
    /// Mental escalation takes precedence over physical, which takes
    /// precedence over economic. This doubles as the tie-break order.
    pub const EVALUATION_ORDER: [AssessorKind; 3] = [
        AssessorKind::Mental,
        AssessorKind::Physical,
        AssessorKind::Economic,
    ];
}

impl fmt::Display for AssessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssessorKind::Mental => "mental",
            AssessorKind::Physical => "physical",
            AssessorKind::Economic => "economic",
        };
        write!(f, "{s}")
    }
}
