//! Mental-health assessor.
//!
//! Risk comes from the deterministic keyword screen; the text generation
//! collaborator only drafts the narrative response. Generation failures
//! propagate and are downgraded to a fail-safe result at the pool boundary.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::assessment::{AssessmentDetails, AssessmentRequest, AssessmentResult};
use crate::domain::foundation::AssessorKind;
use crate::domain::screening::{self, CrisisScreen};
use crate::ports::{
    Assessor, AssessorError, GenerationRequest, SystemPrompts, TaskKind, TextGeneration,
};

/// Emergency resource footer appended to every crisis response.
const EMERGENCY_RESOURCES: &str = "\n\n---\nEmergency resources:\n🆘 24-hour psychological crisis hotline: 400-161-9995\n🏥 If there is immediate danger, please call 120 or go to nearest emergency room";

/// Assessor for the mental dimension.
pub struct MentalHealthAssessor {
    generator: Arc<dyn TextGeneration>,
}

impl MentalHealthAssessor {
    /// Creates the assessor over a text generation service.
    pub fn new(generator: Arc<dyn TextGeneration>) -> Self {
        Self { generator }
    }

    /// Crisis mode: cold parameters, explicit safety instructions, resource
    /// footer appended to whatever was generated.
    async fn crisis_response(
        &self,
        message: &str,
        screen: &CrisisScreen,
    ) -> Result<String, AssessorError> {
        let prompt = format!(
            "User message: {message}\n\nDetected risk signals: {signals:?}\n\nPlease immediately provide:\n1. Empathy and support\n2. Confirm user safety\n3. Guidance to seek professional help (suicide hotline, emergency)\n4. Do not ignore or minimize user feelings\n\nTone: Warm, firm, non-judgmental",
            signals = screen.signals,
        );
        let request = GenerationRequest::for_task(TaskKind::CrisisDetection, prompt)
            .with_system_prompt(SystemPrompts::THERAPIST_BASE);

        let mut response = self.generator.generate(request).await?;
        response.push_str(EMERGENCY_RESOURCES);
        Ok(response)
    }

    /// Ordinary therapeutic response along CBT lines.
    async fn therapeutic_response(&self, message: &str) -> Result<String, AssessorError> {
        let prompt = format!(
            "User current message: {message}\n\nPlease respond based on CBT principles:\n1. First show empathy, confirm user feelings\n2. If cognitive distortions are identified, gently guide awareness\n3. Ask open-ended questions, guide deeper exploration\n4. When appropriate, provide specific coping strategies\n\nNote: Natural conversation, not too textbook-like",
        );
        let request = GenerationRequest::for_task(TaskKind::CasualChat, prompt)
            .with_system_prompt(SystemPrompts::THERAPIST_BASE);

        Ok(self.generator.generate(request).await?)
    }
}

#[async_trait]
impl Assessor for MentalHealthAssessor {
    fn kind(&self) -> AssessorKind {
        AssessorKind::Mental
    }

    async fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResult, AssessorError> {
        let screen = screening::screen_message(&request.message);

        let response = if screen.signals.is_empty() {
            self.therapeutic_response(&request.message).await?
        } else {
            self.crisis_response(&request.message, &screen).await?
        };

        let mut risk_factors = screen.signals.clone();
        risk_factors.extend(screen.distress_indicators.iter().cloned());

        Ok(
            AssessmentResult::new(AssessorKind::Mental, screen.risk_level, screen.confidence)
                .with_recommendations(screening::recommendations_for(screen.risk_level))
                .with_risk_factors(risk_factors)
                .with_details(AssessmentDetails::Mental {
                    response: Some(response),
                    signals: screen.signals,
                }),
        )
    }
}
