//! Merge and escalation rules.
//!
//! Results are folded in the fixed evaluation order mental → physical →
//! economic; that order is also the tie-break. The overall status only ever
//! moves upward within one merge. Advisory lists are concatenated without
//! deduplication; display layers truncate positionally.

use crate::domain::assessment::{
    AssessmentDetails, AssessmentResult, MemoryHit, SynthesisVerdict,
};
use crate::domain::foundation::{AssessorKind, OverallStatus, RiskLevel};

/// Warning emitted when the mental assessor reports high risk.
pub const MENTAL_CRISIS_WARNING: &str = "⚠️ 检测到心理健康高风险，建议立即寻求专业帮助";
/// Warning emitted when the physical assessor reports high risk.
pub const PHYSICAL_INJURY_WARNING: &str = "⚠️ 运动损伤风险较高";
/// Warning emitted when the economic assessor reports any barriers.
pub const ECONOMIC_BARRIER_WARNING: &str = "💰 检测到经济障碍可能影响健康";
/// Warning emitted when healthcare accessibility scores below 0.5.
pub const LOW_ACCESSIBILITY_WARNING: &str = "⚠️ 医疗可及性较低，可能影响获得医疗服务";
/// Insight emitted when healthcare accessibility scores above 0.7.
pub const GOOD_ACCESSIBILITY_INSIGHT: &str = "✅ 医疗可及性良好，可以充分利用医疗资源";

/// Closing recommendation for a `good` verdict.
pub const CLOSING_GOOD: &str = "💚 整体健康状况良好，继续保持";
/// Closing recommendation for an `attention_needed` verdict.
pub const CLOSING_ATTENTION: &str = "💛 建议关注身心健康，适当调整生活方式";
/// Closing recommendation for a `critical` verdict.
pub const CLOSING_CRITICAL: &str = "🔴 建议尽快咨询专业医疗人员";

/// Accessibility below this score warrants a warning.
const ACCESSIBILITY_WARNING_THRESHOLD: f64 = 0.5;
/// Accessibility above this score warrants a positive insight.
const ACCESSIBILITY_INSIGHT_THRESHOLD: f64 = 0.7;

/// Deterministic merge of assessor results and memory hits.
pub struct SynthesisEngine;

impl SynthesisEngine {
    /// Merges one result set plus memory hits into a single verdict.
    ///
    /// Results are looked up by kind in the fixed evaluation order, so the
    /// verdict does not depend on the ordering of `results`. Error-marked
    /// results count as low risk and contribute nothing. Memory hits only
    /// add an insight, never a status change.
    pub fn merge(results: &[AssessmentResult], memory_hits: &[MemoryHit]) -> SynthesisVerdict {
        let mut verdict = SynthesisVerdict::new();

        for kind in AssessorKind::EVALUATION_ORDER {
            let Some(result) = results.iter().find(|r| r.kind == kind) else {
                continue;
            };
            // Fail-safe: a degraded result behaves exactly like a silent
            // low-risk one.
            if result.is_degraded() {
                continue;
            }
            match kind {
                AssessorKind::Mental => Self::merge_mental(result, &mut verdict),
                AssessorKind::Physical => Self::merge_physical(result, &mut verdict),
                AssessorKind::Economic => Self::merge_economic(result, &mut verdict),
            }
        }

        if !memory_hits.is_empty() {
            verdict
                .insights
                .push(format!("基于历史记录，发现{}条相关经验", memory_hits.len()));
        }

        verdict
            .recommendations
            .push(Self::closing_recommendation(verdict.overall_status).to_string());

        verdict
    }

    fn merge_mental(result: &AssessmentResult, verdict: &mut SynthesisVerdict) {
        match result.risk_level {
            RiskLevel::High => {
                verdict.overall_status.escalate_to(OverallStatus::Critical);
                verdict.warnings.push(MENTAL_CRISIS_WARNING.to_string());
                verdict.priority.push(AssessorKind::Mental);
            }
            RiskLevel::Medium => {
                verdict
                    .overall_status
                    .escalate_to(OverallStatus::AttentionNeeded);
                verdict
                    .recommendations
                    .extend(result.recommendations.iter().cloned());
            }
            RiskLevel::Low => {}
        }
    }

    fn merge_physical(result: &AssessmentResult, verdict: &mut SynthesisVerdict) {
        match result.risk_level {
            RiskLevel::High => {
                verdict
                    .overall_status
                    .escalate_to(OverallStatus::AttentionNeeded);
                verdict.warnings.push(PHYSICAL_INJURY_WARNING.to_string());
                verdict.priority.push(AssessorKind::Physical);
                verdict
                    .recommendations
                    .extend(result.recommendations.iter().cloned());
            }
            RiskLevel::Medium => {
                verdict
                    .overall_status
                    .escalate_to(OverallStatus::AttentionNeeded);
                verdict
                    .recommendations
                    .extend(result.recommendations.iter().cloned());
            }
            RiskLevel::Low => {}
        }
    }

    /// Economic results never escalate the overall status.
    fn merge_economic(result: &AssessmentResult, verdict: &mut SynthesisVerdict) {
        if !result.risk_factors.is_empty() {
            verdict.warnings.push(ECONOMIC_BARRIER_WARNING.to_string());
            verdict
                .insights
                .extend(result.risk_factors.iter().take(2).cloned());
        }

        verdict.recommendations.extend(
            result
                .recommendations
                .iter()
                .map(|rec| Self::mark_economic(rec)),
        );

        if let AssessmentDetails::Economic {
            accessibility: Some(accessibility),
            ..
        } = &result.details
        {
            if accessibility.overall_score < ACCESSIBILITY_WARNING_THRESHOLD {
                verdict.warnings.push(LOW_ACCESSIBILITY_WARNING.to_string());
            } else if accessibility.overall_score > ACCESSIBILITY_INSIGHT_THRESHOLD {
                verdict
                    .insights
                    .push(GOOD_ACCESSIBILITY_INSIGHT.to_string());
            }
        }
    }

    /// Prefixes a recommendation to mark its economic origin.
    fn mark_economic(recommendation: &str) -> String {
        if recommendation.starts_with("💰") {
            recommendation.to_string()
        } else {
            format!("💰 {recommendation}")
        }
    }

    /// Closing recommendation keyed by the final status.
    fn closing_recommendation(status: OverallStatus) -> &'static str {
        match status {
            OverallStatus::Good => CLOSING_GOOD,
            OverallStatus::AttentionNeeded => CLOSING_ATTENTION,
            OverallStatus::Critical => CLOSING_CRITICAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{AccessibilityAssessment, IncomeAssessment};
    use crate::domain::foundation::Timestamp;

    fn mental(level: RiskLevel) -> AssessmentResult {
        AssessmentResult::new(AssessorKind::Mental, level, 0.8).with_recommendations(vec![
            "mental-rec-1".to_string(),
            "mental-rec-2".to_string(),
        ])
    }

    fn physical(level: RiskLevel) -> AssessmentResult {
        AssessmentResult::new(AssessorKind::Physical, level, 0.7)
            .with_recommendations(vec!["physical-rec".to_string()])
    }

    fn economic_with(
        barriers: Vec<String>,
        accessibility_score: Option<f64>,
    ) -> AssessmentResult {
        let accessibility = accessibility_score.map(|overall_score| AccessibilityAssessment {
            overall_score,
            country_system: 0.7,
            income_factor: 0.5,
            public_coverage: 0.5,
            barriers: Vec::new(),
        });
        AssessmentResult::new(AssessorKind::Economic, RiskLevel::Low, 0.7)
            .with_risk_factors(barriers)
            .with_recommendations(vec!["使用公共医疗".to_string()])
            .with_details(AssessmentDetails::Economic {
                income: IncomeAssessment::default(),
                accessibility,
                opportunities: Vec::new(),
                country: None,
            })
    }

    fn hit() -> MemoryHit {
        MemoryHit {
            timestamp: Timestamp::now(),
            user_message: "压力大".to_string(),
            prior_response: "...".to_string(),
            risk_level: Some(RiskLevel::Low),
        }
    }

    #[test]
    fn all_quiet_yields_good_without_warnings() {
        let results = vec![
            mental(RiskLevel::Low),
            physical(RiskLevel::Low),
            AssessmentResult::new(AssessorKind::Economic, RiskLevel::Low, 0.5),
        ];
        let verdict = SynthesisEngine::merge(&results, &[]);

        assert_eq!(verdict.overall_status, OverallStatus::Good);
        assert!(verdict.warnings.is_empty());
        assert!(verdict.priority.is_empty());
        assert_eq!(verdict.recommendations, vec![CLOSING_GOOD.to_string()]);
    }

    #[test]
    fn mental_high_always_wins() {
        // Scenario A: mental=high, physical=low, economic has no barriers.
        let results = vec![
            mental(RiskLevel::High),
            physical(RiskLevel::Low),
            economic_with(vec![], None),
        ];
        let verdict = SynthesisEngine::merge(&results, &[]);

        assert_eq!(verdict.overall_status, OverallStatus::Critical);
        assert_eq!(verdict.priority, vec![AssessorKind::Mental]);
        assert!(verdict
            .warnings
            .contains(&MENTAL_CRISIS_WARNING.to_string()));
        assert_eq!(
            verdict.recommendations.last().unwrap(),
            CLOSING_CRITICAL
        );
        // Mental high contributes warning + priority only, not its own recs.
        assert!(!verdict.recommendations.contains(&"mental-rec-1".to_string()));
    }

    #[test]
    fn mental_high_overrides_everything_else() {
        let results = vec![
            mental(RiskLevel::High),
            physical(RiskLevel::High),
            economic_with(vec!["b".to_string()], Some(0.2)),
        ];
        let verdict = SynthesisEngine::merge(&results, &[]);
        assert_eq!(verdict.overall_status, OverallStatus::Critical);
        assert_eq!(
            verdict.priority,
            vec![AssessorKind::Mental, AssessorKind::Physical]
        );
    }

    #[test]
    fn physical_high_raises_attention_with_warning_and_recs() {
        // Scenario B: mental=low, physical=high with one risk factor.
        let results = vec![
            mental(RiskLevel::Low),
            physical(RiskLevel::High).with_risk_factors(vec!["训练负荷过高".to_string()]),
        ];
        let verdict = SynthesisEngine::merge(&results, &[]);

        assert_eq!(verdict.overall_status, OverallStatus::AttentionNeeded);
        assert_eq!(verdict.priority, vec![AssessorKind::Physical]);
        assert!(verdict
            .warnings
            .contains(&PHYSICAL_INJURY_WARNING.to_string()));
        assert!(verdict.recommendations.contains(&"physical-rec".to_string()));
        assert_eq!(verdict.recommendations.last().unwrap(), CLOSING_ATTENTION);
    }

    #[test]
    fn medium_risk_raises_attention_without_priority_or_warning() {
        for results in [
            vec![mental(RiskLevel::Medium), physical(RiskLevel::Low)],
            vec![mental(RiskLevel::Low), physical(RiskLevel::Medium)],
        ] {
            let verdict = SynthesisEngine::merge(&results, &[]);
            assert_eq!(verdict.overall_status, OverallStatus::AttentionNeeded);
            assert!(verdict.priority.is_empty());
            assert!(verdict.warnings.is_empty());
        }
    }

    #[test]
    fn all_assessors_failed_is_still_a_good_verdict() {
        // Scenario C: every assessor failed.
        let results = vec![
            AssessmentResult::failed(AssessorKind::Mental, "boom"),
            AssessmentResult::failed(AssessorKind::Physical, "boom"),
            AssessmentResult::failed(AssessorKind::Economic, "boom"),
        ];
        let verdict = SynthesisEngine::merge(&results, &[]);

        assert_eq!(verdict.overall_status, OverallStatus::Good);
        assert!(verdict.warnings.is_empty());
        assert_eq!(verdict.recommendations, vec![CLOSING_GOOD.to_string()]);
    }

    #[test]
    fn economic_barriers_and_low_accessibility_warn_without_escalating() {
        // Scenario D: one barrier, accessibility 0.4.
        let barrier = "收入远低于国家平均水平，可能难以负担医疗费用".to_string();
        let results = vec![economic_with(vec![barrier.clone()], Some(0.4))];
        let verdict = SynthesisEngine::merge(&results, &[]);

        assert_eq!(verdict.overall_status, OverallStatus::Good);
        assert_eq!(
            verdict.warnings,
            vec![
                ECONOMIC_BARRIER_WARNING.to_string(),
                LOW_ACCESSIBILITY_WARNING.to_string()
            ]
        );
        assert_eq!(verdict.insights, vec![barrier]);
    }

    #[test]
    fn economic_insights_take_first_two_barriers() {
        let barriers = vec!["b1".to_string(), "b2".to_string(), "b3".to_string()];
        let results = vec![economic_with(barriers, None)];
        let verdict = SynthesisEngine::merge(&results, &[]);
        assert_eq!(verdict.insights, vec!["b1".to_string(), "b2".to_string()]);
    }

    #[test]
    fn good_accessibility_becomes_an_insight() {
        let results = vec![economic_with(vec![], Some(0.8))];
        let verdict = SynthesisEngine::merge(&results, &[]);
        assert!(verdict.warnings.is_empty());
        assert_eq!(
            verdict.insights,
            vec![GOOD_ACCESSIBILITY_INSIGHT.to_string()]
        );
    }

    #[test]
    fn middling_accessibility_is_silent() {
        let results = vec![economic_with(vec![], Some(0.6))];
        let verdict = SynthesisEngine::merge(&results, &[]);
        assert!(verdict.warnings.is_empty());
        assert!(verdict.insights.is_empty());
    }

    #[test]
    fn economic_recommendations_are_marked_once() {
        let result = AssessmentResult::new(AssessorKind::Economic, RiskLevel::Low, 0.5)
            .with_recommendations(vec![
                "平衡使用公共和私人医疗".to_string(),
                "💰 收入中等，建议：".to_string(),
            ]);
        let verdict = SynthesisEngine::merge(&[result], &[]);
        assert_eq!(verdict.recommendations[0], "💰 平衡使用公共和私人医疗");
        assert_eq!(verdict.recommendations[1], "💰 收入中等，建议：");
    }

    #[test]
    fn memory_hits_add_one_insight_and_nothing_else() {
        let results = vec![mental(RiskLevel::Low)];
        let hits = vec![hit(), hit(), hit()];
        let verdict = SynthesisEngine::merge(&results, &hits);

        assert_eq!(verdict.overall_status, OverallStatus::Good);
        assert_eq!(verdict.insights, vec!["基于历史记录，发现3条相关经验"]);
    }

    #[test]
    fn duplicate_recommendations_are_preserved() {
        let results = vec![
            mental(RiskLevel::Medium).with_recommendations(vec!["多休息".to_string()]),
            physical(RiskLevel::Medium).with_recommendations(vec!["多休息".to_string()]),
        ];
        let verdict = SynthesisEngine::merge(&results, &[]);
        let count = verdict
            .recommendations
            .iter()
            .filter(|r| *r == "多休息")
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn degraded_high_risk_result_cannot_escalate() {
        let mut poisoned = AssessmentResult::failed(AssessorKind::Mental, "boom");
        poisoned.risk_level = RiskLevel::High;
        let verdict = SynthesisEngine::merge(&[poisoned], &[]);
        assert_eq!(verdict.overall_status, OverallStatus::Good);
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn merge_ignores_input_ordering() {
        let a = vec![
            mental(RiskLevel::High),
            physical(RiskLevel::High),
            economic_with(vec!["b".to_string()], Some(0.4)),
        ];
        let mut b = a.clone();
        b.reverse();

        assert_eq!(SynthesisEngine::merge(&a, &[]), SynthesisEngine::merge(&b, &[]));
    }
}

#[cfg(test)]
mod merge_laws {
    use super::*;
    use proptest::prelude::*;

    fn arb_risk_level() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Low),
            Just(RiskLevel::Medium),
            Just(RiskLevel::High),
        ]
    }

    fn arb_strings() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z]{1,8}", 0..4)
    }

    fn arb_result(kind: AssessorKind) -> impl Strategy<Value = AssessmentResult> {
        (arb_risk_level(), 0.0..=1.0f64, arb_strings(), arb_strings()).prop_map(
            move |(risk_level, confidence, recommendations, risk_factors)| {
                AssessmentResult::new(kind, risk_level, confidence)
                    .with_recommendations(recommendations)
                    .with_risk_factors(risk_factors)
            },
        )
    }

    fn arb_results() -> impl Strategy<Value = Vec<AssessmentResult>> {
        (
            arb_result(AssessorKind::Mental),
            arb_result(AssessorKind::Physical),
            arb_result(AssessorKind::Economic),
        )
            .prop_map(|(m, p, e)| vec![m, p, e])
    }

    proptest! {
        /// Pure merge: identical inputs, structurally identical outputs.
        #[test]
        fn merge_is_idempotent(results in arb_results()) {
            let first = SynthesisEngine::merge(&results, &[]);
            let second = SynthesisEngine::merge(&results, &[]);
            prop_assert_eq!(first, second);
        }

        /// Permuting the result list never changes the verdict.
        #[test]
        fn merge_is_order_independent(results in arb_results().prop_shuffle()) {
            let mut sorted = results.clone();
            sorted.sort_by_key(|r| {
                AssessorKind::EVALUATION_ORDER
                    .iter()
                    .position(|k| *k == r.kind)
            });
            prop_assert_eq!(
                SynthesisEngine::merge(&results, &[]),
                SynthesisEngine::merge(&sorted, &[])
            );
        }

        /// A failed assessor never yields a more severe status than a
        /// low-risk result from the same assessor.
        #[test]
        fn failure_is_fail_safe(results in arb_results(), index in 0usize..3) {
            let kind = results[index].kind;

            let mut with_failure = results.clone();
            with_failure[index] = AssessmentResult::failed(kind, "injected failure");

            let mut with_low = results;
            with_low[index] = AssessmentResult::unknown(kind);

            let failed_status = SynthesisEngine::merge(&with_failure, &[]).overall_status;
            let low_status = SynthesisEngine::merge(&with_low, &[]).overall_status;
            prop_assert!(failed_status <= low_status);
        }

        /// Memory hits never move the overall status.
        #[test]
        fn memory_never_changes_status(results in arb_results(), hit_count in 0usize..6) {
            use crate::domain::foundation::Timestamp;
            use crate::domain::assessment::MemoryHit;

            let hits: Vec<MemoryHit> = (0..hit_count)
                .map(|i| MemoryHit {
                    timestamp: Timestamp::now(),
                    user_message: format!("m{i}"),
                    prior_response: String::new(),
                    risk_level: None,
                })
                .collect();

            prop_assert_eq!(
                SynthesisEngine::merge(&results, &hits).overall_status,
                SynthesisEngine::merge(&results, &[]).overall_status
            );
        }

        /// Mental high forces a critical verdict regardless of the rest.
        #[test]
        fn mental_high_precedence(results in arb_results()) {
            let mut results = results;
            results[0] = AssessmentResult::new(AssessorKind::Mental, RiskLevel::High, 0.9);
            let verdict = SynthesisEngine::merge(&results, &[]);
            prop_assert_eq!(verdict.overall_status, OverallStatus::Critical);
            prop_assert_eq!(verdict.priority.first().copied(), Some(AssessorKind::Mental));
        }
    }
}
