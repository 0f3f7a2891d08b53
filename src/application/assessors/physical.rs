//! Physical-injury assessor.
//!
//! Rule-based only: training data feeds the additive injury score, the
//! message is scanned for body-symptom keywords. Without training data the
//! assessor answers with a minimal low-confidence result instead of failing.

use async_trait::async_trait;

use crate::domain::assessment::{
    AssessmentDetails, AssessmentRequest, AssessmentResult, SymptomSeverity,
};
use crate::domain::foundation::{AssessorKind, RiskLevel};
use crate::domain::injury;
use crate::ports::{Assessor, AssessorError};

/// Follow-up recommendation when body symptoms appear in the message.
const SYMPTOM_RECOMMENDATION: &str = "如果症状持续，建议咨询医疗专业人士";

/// Assessor for the physical dimension.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhysicalHealthAssessor;

impl PhysicalHealthAssessor {
    /// Creates the assessor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Assessor for PhysicalHealthAssessor {
    fn kind(&self) -> AssessorKind {
        AssessorKind::Physical
    }

    async fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResult, AssessorError> {
        let detected_symptoms = injury::detect_symptoms(&request.message);
        let symptom_severity = match detected_symptoms.len() {
            0 => None,
            1 => Some(SymptomSeverity::Mild),
            _ => Some(SymptomSeverity::Moderate),
        };

        let mut result = match &request.context.training {
            Some(training) => {
                let prediction = injury::predict_risk(training);
                let recommendations =
                    injury::recommendations_for(prediction.risk_score, &prediction.risk_factors);
                AssessmentResult::new(
                    AssessorKind::Physical,
                    prediction.risk_level,
                    prediction.confidence,
                )
                .with_recommendations(recommendations)
                .with_risk_factors(prediction.risk_factors)
                .with_details(AssessmentDetails::Physical {
                    risk_score: prediction.risk_score,
                    detected_symptoms: detected_symptoms.clone(),
                    symptom_severity,
                })
            }
            // No training data: minimal assessment, never a failure.
            None => AssessmentResult::new(AssessorKind::Physical, RiskLevel::Low, 0.0)
                .with_details(AssessmentDetails::Physical {
                    risk_score: 0.0,
                    detected_symptoms: detected_symptoms.clone(),
                    symptom_severity,
                }),
        };

        if !detected_symptoms.is_empty() {
            result
                .recommendations
                .push(SYMPTOM_RECOMMENDATION.to_string());
        }

        Ok(result)
    }
}
