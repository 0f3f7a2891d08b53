//! Physical injury risk rule table.
//!
//! Additive scoring over training data with fixed thresholds. No model is
//! loaded here; a model-backed predictor would be a separate implementation
//! of the assessor capability interface.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::TrainingData;
use crate::domain::foundation::RiskLevel;

/// Body-symptom keywords scanned in the free-text message.
const SYMPTOM_KEYWORDS: [&str; 9] = [
    "疼", "痛", "不适", "疲劳", "受伤", "膝盖", "脚踝", "肌肉", "关节",
];

/// Score below which risk is `low`.
pub const LOW_THRESHOLD: f64 = 0.3;
/// Score below which risk is `medium`; at or above it is `high`.
pub const HIGH_THRESHOLD: f64 = 0.6;

/// Outcome of the rule-based injury prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Cumulative score, clamped to [0, 1].
    pub risk_score: f64,
    /// Level derived from the score thresholds.
    pub risk_level: RiskLevel,
    /// Which rules fired, in rule order.
    pub risk_factors: Vec<String>,
    /// Confidence grows with the number of fired rules, capped at 0.9.
    pub confidence: f64,
}

/// Applies the additive risk rules to training data.
pub fn predict_risk(data: &TrainingData) -> RiskPrediction {
    let mut risk_factors = Vec::new();
    let mut risk_score: f64 = 0.0;

    if data.recent_injury {
        risk_factors.push("近期有伤病历史".to_string());
        risk_score += 0.3;
    }

    let training_load = data.training_load.unwrap_or(0.0);
    if training_load > 0.8 {
        risk_factors.push("训练负荷过高".to_string());
        risk_score += 0.2;
    } else if training_load > 0.6 {
        risk_factors.push("训练负荷较高".to_string());
        risk_score += 0.1;
    }

    let match_intensity = data.match_intensity.unwrap_or(0.0);
    if match_intensity > 0.8 {
        risk_factors.push("比赛强度过大".to_string());
        risk_score += 0.2;
    } else if match_intensity > 0.6 {
        risk_factors.push("比赛强度较高".to_string());
        risk_score += 0.1;
    }

    if data.games_played.unwrap_or(0) > 20 {
        risk_factors.push("比赛场次过多".to_string());
        risk_score += 0.1;
    }

    if data.age.unwrap_or(25) > 30 {
        risk_factors.push("年龄因素".to_string());
        risk_score += 0.05;
    }

    if let Some(recovery_days) = data.recovery_days {
        if recovery_days < 2 {
            risk_factors.push("恢复时间不足".to_string());
            risk_score += 0.15;
        }
    }

    let risk_score = risk_score.min(1.0);
    let risk_level = level_for_score(risk_score);
    let confidence = (0.5 + 0.1 * risk_factors.len() as f64).min(0.9);

    RiskPrediction {
        risk_score,
        risk_level,
        risk_factors,
        confidence,
    }
}

/// Maps a cumulative score to a risk level.
pub fn level_for_score(score: f64) -> RiskLevel {
    if score < LOW_THRESHOLD {
        RiskLevel::Low
    } else if score < HIGH_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Prevention recommendations for a score plus factor-specific follow-ups.
pub fn recommendations_for(risk_score: f64, risk_factors: &[String]) -> Vec<String> {
    let mut recommendations: Vec<String> = if risk_score > HIGH_THRESHOLD {
        vec![
            "⚠️ 建议立即减少训练强度，增加休息时间".to_string(),
            "进行全面的身体评估".to_string(),
            "关注恢复和营养补充".to_string(),
            "考虑咨询运动医学专家".to_string(),
        ]
    } else if risk_score > LOW_THRESHOLD {
        vec![
            "适度调整训练计划".to_string(),
            "加强热身和拉伸".to_string(),
            "监控身体反应".to_string(),
            "确保充足的睡眠和营养".to_string(),
        ]
    } else {
        vec![
            "保持当前训练计划".to_string(),
            "继续监控身体状况".to_string(),
            "保持良好的运动习惯".to_string(),
        ]
    };

    if risk_factors.iter().any(|f| f == "训练负荷过高") {
        recommendations.push("建议降低训练强度，增加恢复时间".to_string());
    }
    if risk_factors.iter().any(|f| f == "比赛强度过大") {
        recommendations.push("考虑减少比赛频率，给身体更多恢复时间".to_string());
    }
    if risk_factors.iter().any(|f| f == "近期有伤病历史") {
        recommendations.push("建议进行专业的康复训练，避免重复受伤".to_string());
    }

    recommendations
}

/// Scans a message for body-symptom keywords, in table order.
pub fn detect_symptoms(message: &str) -> Vec<String> {
    SYMPTOM_KEYWORDS
        .iter()
        .filter(|kw| message.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_training_data_is_low_risk() {
        let prediction = predict_risk(&TrainingData::new());
        assert_eq!(prediction.risk_score, 0.0);
        assert_eq!(prediction.risk_level, RiskLevel::Low);
        assert!(prediction.risk_factors.is_empty());
        assert_eq!(prediction.confidence, 0.5);
    }

    #[test]
    fn heavy_load_with_recent_injury_is_high_risk() {
        let data = TrainingData::new()
            .with_recent_injury(true)
            .with_training_load(0.9)
            .with_match_intensity(0.85)
            .with_games_played(22);

        let prediction = predict_risk(&data);
        // 0.3 + 0.2 + 0.2 + 0.1 = 0.8
        assert!((prediction.risk_score - 0.8).abs() < 1e-9);
        assert_eq!(prediction.risk_level, RiskLevel::High);
        assert_eq!(
            prediction.risk_factors,
            vec!["近期有伤病历史", "训练负荷过高", "比赛强度过大", "比赛场次过多"]
        );
        assert_eq!(prediction.confidence, 0.9);
    }

    #[test]
    fn moderate_load_is_medium_risk() {
        let data = TrainingData::new()
            .with_training_load(0.7)
            .with_match_intensity(0.7)
            .with_recovery_days(1);

        let prediction = predict_risk(&data);
        // 0.1 + 0.1 + 0.15 = 0.35
        assert_eq!(prediction.risk_level, RiskLevel::Medium);
        assert!(prediction.risk_factors.contains(&"恢复时间不足".to_string()));
    }

    #[test]
    fn score_is_clamped_to_one() {
        let data = TrainingData::new()
            .with_recent_injury(true)
            .with_training_load(0.95)
            .with_match_intensity(0.95)
            .with_games_played(30)
            .with_age(35)
            .with_recovery_days(0);

        let prediction = predict_risk(&data);
        assert!(prediction.risk_score <= 1.0);
        assert_eq!(prediction.risk_level, RiskLevel::High);
    }

    #[test]
    fn thresholds_bucket_scores() {
        assert_eq!(level_for_score(0.0), RiskLevel::Low);
        assert_eq!(level_for_score(0.29), RiskLevel::Low);
        assert_eq!(level_for_score(0.3), RiskLevel::Medium);
        assert_eq!(level_for_score(0.59), RiskLevel::Medium);
        assert_eq!(level_for_score(0.6), RiskLevel::High);
    }

    #[test]
    fn recommendations_include_factor_specific_entries() {
        let factors = vec!["训练负荷过高".to_string(), "近期有伤病历史".to_string()];
        let recommendations = recommendations_for(0.7, &factors);
        assert_eq!(recommendations[0], "⚠️ 建议立即减少训练强度，增加休息时间");
        assert!(recommendations.contains(&"建议降低训练强度，增加恢复时间".to_string()));
        assert!(recommendations.contains(&"建议进行专业的康复训练，避免重复受伤".to_string()));
    }

    #[test]
    fn low_score_gets_maintenance_recommendations() {
        let recommendations = recommendations_for(0.1, &[]);
        assert_eq!(recommendations.len(), 3);
        assert_eq!(recommendations[0], "保持当前训练计划");
    }

    #[test]
    fn detects_symptom_keywords_in_message() {
        let symptoms = detect_symptoms("运动时膝盖有点疼，还觉得疲劳");
        assert_eq!(symptoms, vec!["疼", "疲劳", "膝盖"]);
        assert!(detect_symptoms("一切都好").is_empty());
    }
}
