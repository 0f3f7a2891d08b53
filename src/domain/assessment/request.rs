//! Assessment request value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// One incoming query.
///
/// Created once per request and never mutated; the pool hands each assessor
/// its own clone so assessors cannot communicate through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// User the request belongs to.
    pub user_id: UserId,
    /// Free-text message from the user.
    pub message: String,
    /// Optional assessor-specific parameters.
    #[serde(default)]
    pub context: AssessmentContext,
}

impl AssessmentRequest {
    /// Creates a request with an empty context.
    pub fn new(user_id: UserId, message: impl Into<String>) -> Self {
        Self {
            user_id,
            message: message.into(),
            context: AssessmentContext::default(),
        }
    }

    /// Sets the typed context bag.
    pub fn with_context(mut self, context: AssessmentContext) -> Self {
        self.context = context;
        self
    }
}

/// Typed context bag carrying optional assessor inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentContext {
    /// Training/match data consumed by the physical assessor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingData>,
    /// Annual income in USD, consumed by the economic assessor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    /// ISO country code (e.g. "US", "CN"), consumed by the economic assessor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Health concerns the user flagged (e.g. "mental_health").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub health_concerns: Vec<String>,
}

impl AssessmentContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the training data.
    pub fn with_training(mut self, training: TrainingData) -> Self {
        self.training = Some(training);
        self
    }

    /// Sets the annual income in USD.
    pub fn with_income(mut self, income: f64) -> Self {
        self.income = Some(income);
        self
    }

    /// Sets the country code, normalized to uppercase.
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into().to_uppercase());
        self
    }

    /// Adds a health concern.
    pub fn with_health_concern(mut self, concern: impl Into<String>) -> Self {
        self.health_concerns.push(concern.into());
        self
    }

    /// Returns true if no assessor-specific parameters were provided.
    pub fn is_empty(&self) -> bool {
        self.training.is_none()
            && self.income.is_none()
            && self.country_code.is_none()
            && self.health_concerns.is_empty()
    }
}

/// Training and match-load data for the injury risk rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingData {
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Matches played this season.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games_played: Option<u32>,
    /// Whether the user was recently injured.
    #[serde(default)]
    pub recent_injury: bool,
    /// Normalized training load in [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_load: Option<f64>,
    /// Normalized match intensity in [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_intensity: Option<f64>,
    /// Rest days since the last session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_days: Option<u32>,
}

impl TrainingData {
    /// Creates empty training data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the age.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the games played count.
    pub fn with_games_played(mut self, games: u32) -> Self {
        self.games_played = Some(games);
        self
    }

    /// Marks a recent injury.
    pub fn with_recent_injury(mut self, recent: bool) -> Self {
        self.recent_injury = recent;
        self
    }

    /// Sets the normalized training load.
    pub fn with_training_load(mut self, load: f64) -> Self {
        self.training_load = Some(load);
        self
    }

    /// Sets the normalized match intensity.
    pub fn with_match_intensity(mut self, intensity: f64) -> Self {
        self.match_intensity = Some(intensity);
        self
    }

    /// Sets the recovery days.
    pub fn with_recovery_days(mut self, days: u32) -> Self {
        self.recovery_days = Some(days);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builder_collects_fields() {
        let context = AssessmentContext::new()
            .with_income(5000.0)
            .with_country_code("cn")
            .with_health_concern("mental_health");

        assert_eq!(context.income, Some(5000.0));
        assert_eq!(context.country_code.as_deref(), Some("CN"));
        assert_eq!(context.health_concerns, vec!["mental_health"]);
        assert!(!context.is_empty());
    }

    #[test]
    fn empty_context_reports_empty() {
        assert!(AssessmentContext::new().is_empty());
    }

    #[test]
    fn request_serializes_without_empty_context_fields() {
        let request = AssessmentRequest::new(UserId::new("u1").unwrap(), "压力很大");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["message"], "压力很大");
        assert!(json["context"].get("income").is_none());
    }
}
