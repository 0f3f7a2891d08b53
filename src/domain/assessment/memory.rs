//! Memory shapes shared with the memory gateway.

use serde::{Deserialize, Serialize};

use super::SynthesisVerdict;
use crate::domain::foundation::{RiskLevel, Timestamp, UserId};

/// A prior interaction snippet retrieved by relevance to the current message.
///
/// Owned by the memory gateway; the synthesis step only counts hits, it does
/// not interpret them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHit {
    /// When the original interaction happened.
    pub timestamp: Timestamp,
    /// The user's original message.
    pub user_message: String,
    /// The response given at the time.
    pub prior_response: String,
    /// Mental risk level recorded for that turn, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

/// The durable record written once per processed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredExperience {
    /// User the experience belongs to.
    pub user_id: UserId,
    /// The user's message.
    pub message: String,
    /// Generated narrative response, when the mental assessor produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Mental risk level of this turn, if assessed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    /// The synthesized verdict, embedded rather than stored separately.
    pub verdict: SynthesisVerdict,
    /// When the request was processed.
    pub timestamp: Timestamp,
}

impl StoredExperience {
    /// Creates an experience record stamped with the current time.
    pub fn new(
        user_id: UserId,
        message: impl Into<String>,
        response: Option<String>,
        risk_level: Option<RiskLevel>,
        verdict: SynthesisVerdict,
    ) -> Self {
        Self {
            user_id,
            message: message.into(),
            response,
            risk_level,
            verdict,
            timestamp: Timestamp::now(),
        }
    }
}
