//! Per-assessor assessment results.
//!
//! `AssessmentResult` is the closed tagged-variant shape every assessor
//! produces: a common envelope (kind, risk level, confidence, lists, error
//! marker) plus kind-specific details. Results are immutable once produced.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssessorKind, RiskLevel};

/// Result produced by exactly one assessor for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Which assessor produced this result.
    pub kind: AssessorKind,
    /// Risk level for this dimension.
    pub risk_level: RiskLevel,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Ordered, human-readable recommendations.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Risk factors (mental/physical) or barriers (economic).
    #[serde(default)]
    pub risk_factors: Vec<String>,
    /// Failure description when the assessor failed; the envelope then
    /// carries the fail-safe low risk level and empty lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Kind-specific payload.
    #[serde(default)]
    pub details: AssessmentDetails,
}

impl AssessmentResult {
    /// Creates a result with the given level and confidence and empty lists.
    pub fn new(kind: AssessorKind, risk_level: RiskLevel, confidence: f64) -> Self {
        Self {
            kind,
            risk_level,
            confidence: confidence.clamp(0.0, 1.0),
            recommendations: Vec::new(),
            risk_factors: Vec::new(),
            error: None,
            details: AssessmentDetails::None,
        }
    }

    /// Fail-safe result for a failed assessor: low risk, error marked.
    ///
    /// Failure never promotes risk, so the envelope is the lowest level with
    /// zero confidence and no advisory content.
    pub fn failed(kind: AssessorKind, description: impl Into<String>) -> Self {
        let mut result = Self::new(kind, RiskLevel::Low, 0.0);
        result.error = Some(description.into());
        result
    }

    /// Minimal result for a request missing the context this assessor needs.
    pub fn unknown(kind: AssessorKind) -> Self {
        Self::new(kind, RiskLevel::Low, 0.0)
    }

    /// Replaces the recommendation list.
    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Replaces the risk factor / barrier list.
    pub fn with_risk_factors(mut self, risk_factors: Vec<String>) -> Self {
        self.risk_factors = risk_factors;
        self
    }

    /// Sets the kind-specific details.
    pub fn with_details(mut self, details: AssessmentDetails) -> Self {
        self.details = details;
        self
    }

    /// True when this result is a degraded (failed or timed-out) entry.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Kind-specific payload of an assessment result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssessmentDetails {
    /// No kind-specific payload (failed or minimal results).
    #[default]
    None,
    /// Mental-health payload.
    Mental {
        /// Generated therapeutic or crisis response, when drafting succeeded.
        #[serde(skip_serializing_if = "Option::is_none")]
        response: Option<String>,
        /// Crisis signals matched in the message.
        #[serde(default)]
        signals: Vec<String>,
    },
    /// Physical-injury payload.
    Physical {
        /// Cumulative rule-table risk score in [0, 1].
        risk_score: f64,
        /// Body-symptom keywords detected in the message.
        #[serde(default)]
        detected_symptoms: Vec<String>,
        /// Severity derived from the symptom count.
        #[serde(skip_serializing_if = "Option::is_none")]
        symptom_severity: Option<SymptomSeverity>,
    },
    /// Economic payload.
    Economic {
        /// Income assessment relative to the user's country.
        income: IncomeAssessment,
        /// Healthcare accessibility, when a country profile was available.
        #[serde(skip_serializing_if = "Option::is_none")]
        accessibility: Option<AccessibilityAssessment>,
        /// Resources and options open to the user.
        #[serde(default)]
        opportunities: Vec<String>,
        /// Country reference data used for the assessment.
        #[serde(skip_serializing_if = "Option::is_none")]
        country: Option<CountrySummary>,
    },
}

/// Severity bucket for detected body symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomSeverity {
    Mild,
    Moderate,
}

/// Income level relative to the user's country (or World Bank bands when the
/// country is unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeIncomeLevel {
    /// Income was not provided.
    #[default]
    Unknown,
    /// Below the World Bank low-income threshold (no country context).
    VeryLow,
    /// Below half the country's GDP per capita.
    Low,
    /// Below the country's GDP per capita.
    BelowAverage,
    /// World Bank middle band (no country context).
    Middle,
    /// Up to 1.5x the country's GDP per capita.
    Average,
    /// Up to 2x the country's GDP per capita.
    AboveAverage,
    /// Above 2x the country's GDP per capita.
    High,
}

impl std::fmt::Display for RelativeIncomeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RelativeIncomeLevel::Unknown => "unknown",
            RelativeIncomeLevel::VeryLow => "very_low",
            RelativeIncomeLevel::Low => "low",
            RelativeIncomeLevel::BelowAverage => "below_average",
            RelativeIncomeLevel::Middle => "middle",
            RelativeIncomeLevel::Average => "average",
            RelativeIncomeLevel::AboveAverage => "above_average",
            RelativeIncomeLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

/// Assessment of the user's income and what it can cover.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeAssessment {
    /// Annual income in USD, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    /// Band relative to the reference economy.
    pub relative_level: RelativeIncomeLevel,
    /// Whether routine healthcare is affordable (needs a country profile).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_afford_healthcare: Option<bool>,
    /// Whether preventive care is affordable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_afford_preventive_care: Option<bool>,
    /// Whether mental-health services are affordable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_afford_mental_health: Option<bool>,
}

/// Weighted healthcare accessibility assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityAssessment {
    /// Weighted overall score in [0, 1].
    pub overall_score: f64,
    /// Country healthcare system component.
    pub country_system: f64,
    /// Income component (income / GDP per capita, capped at 1).
    pub income_factor: f64,
    /// Public healthcare coverage component.
    pub public_coverage: f64,
    /// Access barriers specific to this assessment.
    #[serde(default)]
    pub barriers: Vec<String>,
}

/// Country reference data echoed into the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub code: String,
    pub name: String,
    pub income_level: String,
    pub gdp_per_capita: f64,
}
