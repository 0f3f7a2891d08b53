//! Economic-accessibility assessor.
//!
//! Wraps the economics rule table. A request with neither income nor country
//! is not an error: the assessor answers with a minimal unknown assessment.

use async_trait::async_trait;

use crate::domain::assessment::{
    AssessmentDetails, AssessmentRequest, AssessmentResult, IncomeAssessment,
};
use crate::domain::economics;
use crate::domain::foundation::{AssessorKind, RiskLevel};
use crate::ports::{Assessor, AssessorError};

/// Assessor for the economic dimension.
#[derive(Debug, Default, Clone, Copy)]
pub struct EconomicHealthAssessor;

impl EconomicHealthAssessor {
    /// Creates the assessor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Assessor for EconomicHealthAssessor {
    fn kind(&self) -> AssessorKind {
        AssessorKind::Economic
    }

    async fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResult, AssessorError> {
        let context = &request.context;

        if context.income.is_none() && context.country_code.is_none() {
            return Ok(AssessmentResult::unknown(AssessorKind::Economic).with_details(
                AssessmentDetails::Economic {
                    income: IncomeAssessment::default(),
                    accessibility: None,
                    opportunities: Vec::new(),
                    country: None,
                },
            ));
        }

        let analysis = economics::analyze(
            context.income,
            context.country_code.as_deref(),
            &context.health_concerns,
        );

        let confidence = if context.income.is_some() && context.country_code.is_some() {
            0.8
        } else {
            0.5
        };

        Ok(
            AssessmentResult::new(AssessorKind::Economic, RiskLevel::Low, confidence)
                .with_recommendations(analysis.recommendations)
                .with_risk_factors(analysis.barriers)
                .with_details(AssessmentDetails::Economic {
                    income: analysis.income,
                    accessibility: analysis.accessibility,
                    opportunities: analysis.opportunities,
                    country: analysis.country,
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{AssessmentContext, RelativeIncomeLevel};
    use crate::domain::foundation::UserId;

    fn request(context: AssessmentContext) -> AssessmentRequest {
        AssessmentRequest::new(UserId::new("u1").unwrap(), "我担心看病的费用").with_context(context)
    }

    #[tokio::test]
    async fn missing_income_and_country_yields_unknown_minimal_result() {
        let result = EconomicHealthAssessor::new()
            .assess(&request(AssessmentContext::new()))
            .await
            .unwrap();

        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.confidence, 0.0);
        assert!(result.risk_factors.is_empty());
        assert!(result.recommendations.is_empty());
        assert!(!result.is_degraded());
        match result.details {
            AssessmentDetails::Economic { income, .. } => {
                assert_eq!(income.relative_level, RelativeIncomeLevel::Unknown);
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[tokio::test]
    async fn low_income_in_known_country_reports_barriers() {
        let context = AssessmentContext::new()
            .with_income(4000.0)
            .with_country_code("CN");
        let result = EconomicHealthAssessor::new()
            .assess(&request(context))
            .await
            .unwrap();

        assert_eq!(result.confidence, 0.8);
        assert!(result
            .risk_factors
            .contains(&"收入远低于国家平均水平，可能难以负担医疗费用".to_string()));
        match result.details {
            AssessmentDetails::Economic {
                income,
                accessibility,
                country,
                ..
            } => {
                assert_eq!(income.relative_level, RelativeIncomeLevel::Low);
                assert!(accessibility.is_some());
                assert_eq!(country.unwrap().code, "CN");
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[tokio::test]
    async fn income_without_country_uses_world_bank_bands() {
        let context = AssessmentContext::new().with_income(800.0);
        let result = EconomicHealthAssessor::new()
            .assess(&request(context))
            .await
            .unwrap();

        assert_eq!(result.confidence, 0.5);
        match result.details {
            AssessmentDetails::Economic {
                income,
                accessibility,
                ..
            } => {
                assert_eq!(income.relative_level, RelativeIncomeLevel::VeryLow);
                assert!(accessibility.is_none());
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }
}
