//! Mental-health keyword screening rule table.
//!
//! Two-layer screen: crisis keywords escalate straight to high risk,
//! distress keywords mark medium risk. The screen is deterministic; the
//! text-generation collaborator only drafts the response, never the level.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::RiskLevel;

/// Keywords indicating acute crisis. Any match means high risk.
const CRISIS_KEYWORDS: [&str; 10] = [
    "suicide",
    "self-harm",
    "自杀",
    "轻生",
    "伤害自己",
    "割腕",
    "跳楼",
    "不想活",
    "结束生命",
    "活不下去",
];

/// Keywords indicating sustained distress. Matches mean medium risk.
const DISTRESS_KEYWORDS: [&str; 9] = [
    "压力",
    "焦虑",
    "失眠",
    "抑郁",
    "情绪低落",
    "烦躁",
    "stress",
    "anxiety",
    "depressed",
];

/// Outcome of screening one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisScreen {
    /// Screened risk level.
    pub risk_level: RiskLevel,
    /// Crisis keywords matched in the message.
    pub signals: Vec<String>,
    /// Distress keywords matched in the message.
    pub distress_indicators: Vec<String>,
    /// Confidence in [0, 1]; zero when nothing matched.
    pub confidence: f64,
}

/// Screens a message against the crisis and distress keyword tables.
pub fn screen_message(message: &str) -> CrisisScreen {
    let lowered = message.to_lowercase();

    let signals: Vec<String> = CRISIS_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(&kw.to_lowercase()))
        .map(|kw| kw.to_string())
        .collect();

    let distress_indicators: Vec<String> = DISTRESS_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(&kw.to_lowercase()))
        .map(|kw| kw.to_string())
        .collect();

    let (risk_level, confidence) = if !signals.is_empty() {
        (
            RiskLevel::High,
            (0.6 + 0.1 * signals.len() as f64).min(0.95),
        )
    } else if !distress_indicators.is_empty() {
        (
            RiskLevel::Medium,
            (0.5 + 0.1 * distress_indicators.len() as f64).min(0.8),
        )
    } else {
        (RiskLevel::Low, 0.0)
    };

    CrisisScreen {
        risk_level,
        signals,
        distress_indicators,
        confidence,
    }
}

/// Canned recommendations keyed by screened risk level.
pub fn recommendations_for(risk_level: RiskLevel) -> Vec<String> {
    let texts: &[&str] = match risk_level {
        RiskLevel::High => &["建议立即寻求专业心理健康帮助", "可以联系心理健康热线或专业咨询师"],
        RiskLevel::Medium => &["建议关注心理健康，考虑咨询专业人士", "尝试放松技巧和压力管理"],
        RiskLevel::Low => &["保持良好的心理健康习惯", "定期进行自我反思和情绪管理"],
    };
    texts.iter().map(|t| t.to_string()).collect()
}
