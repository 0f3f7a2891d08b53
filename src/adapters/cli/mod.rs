//! Terminal rendering of reports and summaries.
//!
//! Lists are shown as capped prefixes (positional truncation); nothing is
//! deduplicated here, mirroring how the verdict is built.

use std::fmt::Write as _;

use crate::application::{HealthReport, UserHealthSummary};
use crate::domain::assessment::{AssessmentDetails, AssessmentResult};
use crate::domain::foundation::{AssessorKind, OverallStatus};

/// Recommendations shown per assessor section.
const ASSESSOR_RECOMMENDATION_CAP: usize = 3;
/// Barriers shown in the economic section.
const BARRIER_CAP: usize = 2;
/// Recommendations shown in the synthesis section.
const SYNTHESIS_RECOMMENDATION_CAP: usize = 5;
/// Insights shown in the synthesis section.
const INSIGHT_CAP: usize = 3;

/// Renders one report as readable terminal text.
pub fn render_report(report: &HealthReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", "=".repeat(60));
    let _ = writeln!(out, "健康分析结果");
    let _ = writeln!(out, "{}", "=".repeat(60));

    let _ = writeln!(out, "\n📅 时间: {}", report.timestamp);
    let _ = writeln!(out, "👤 用户ID: {}", report.user_id);
    let _ = writeln!(out, "💬 消息: {}", report.message);

    for result in &report.assessments {
        match result.kind {
            AssessorKind::Mental => render_mental(&mut out, result),
            AssessorKind::Physical => render_physical(&mut out, result),
            AssessorKind::Economic => render_economic(&mut out, result),
        }
    }

    render_synthesis(&mut out, report);

    let _ = writeln!(out, "\n{}", "=".repeat(60));
    out
}

fn render_section_error(out: &mut String, result: &AssessmentResult) -> bool {
    if let Some(error) = &result.error {
        let _ = writeln!(out, "  ❌ 错误: {error}");
        return true;
    }
    false
}

fn render_recommendations(out: &mut String, recommendations: &[String], cap: usize) {
    if recommendations.is_empty() {
        return;
    }
    let _ = writeln!(out, "  建议:");
    for rec in recommendations.iter().take(cap) {
        let _ = writeln!(out, "    • {rec}");
    }
}

fn render_mental(out: &mut String, result: &AssessmentResult) {
    let _ = writeln!(out, "\n🧠 心理健康分析:");
    if render_section_error(out, result) {
        return;
    }
    let _ = writeln!(out, "  风险等级: {}", result.risk_level);
    let _ = writeln!(out, "  置信度: {:.2}", result.confidence);
    if let AssessmentDetails::Mental {
        response: Some(response),
        ..
    } = &result.details
    {
        let _ = writeln!(out, "  回应: {response}");
    }
    render_recommendations(out, &result.recommendations, ASSESSOR_RECOMMENDATION_CAP);
}

fn render_physical(out: &mut String, result: &AssessmentResult) {
    let _ = writeln!(out, "\n💪 身体健康分析:");
    if render_section_error(out, result) {
        return;
    }
    let _ = writeln!(out, "  风险等级: {}", result.risk_level);
    if let AssessmentDetails::Physical { risk_score, .. } = &result.details {
        let _ = writeln!(out, "  风险分数: {risk_score:.2}");
    }
    if !result.risk_factors.is_empty() {
        let _ = writeln!(out, "  风险因素: {}", result.risk_factors.join(", "));
    }
    render_recommendations(out, &result.recommendations, ASSESSOR_RECOMMENDATION_CAP);
}

fn render_economic(out: &mut String, result: &AssessmentResult) {
    let _ = writeln!(out, "\n💰 经济健康分析:");
    if render_section_error(out, result) {
        return;
    }
    if let AssessmentDetails::Economic {
        income,
        accessibility,
        country,
        ..
    } = &result.details
    {
        if let Some(country) = country {
            let _ = writeln!(out, "  国家: {}", country.name);
        }
        let _ = writeln!(out, "  收入水平: {}", income.relative_level);
        if let Some(accessibility) = accessibility {
            let _ = writeln!(out, "  医疗可及性: {:.2}", accessibility.overall_score);
        }
    }
    if !result.risk_factors.is_empty() {
        let _ = writeln!(out, "  经济障碍:");
        for barrier in result.risk_factors.iter().take(BARRIER_CAP) {
            let _ = writeln!(out, "    • {barrier}");
        }
    }
    render_recommendations(out, &result.recommendations, ASSESSOR_RECOMMENDATION_CAP);
}

fn render_synthesis(out: &mut String, report: &HealthReport) {
    let synthesis = &report.synthesis;
    let status_emoji = match synthesis.overall_status {
        OverallStatus::Good => "💚",
        OverallStatus::AttentionNeeded => "💛",
        OverallStatus::Critical => "🔴",
    };

    let _ = writeln!(out, "\n📊 综合分析:");
    let _ = writeln!(
        out,
        "  {status_emoji} 整体健康状态: {}",
        synthesis.overall_status
    );

    if !synthesis.warnings.is_empty() {
        let _ = writeln!(out, "\n  ⚠️  警告:");
        for warning in &synthesis.warnings {
            let _ = writeln!(out, "    • {warning}");
        }
    }

    if !synthesis.recommendations.is_empty() {
        let _ = writeln!(out, "\n  💡 综合建议:");
        for rec in synthesis
            .recommendations
            .iter()
            .take(SYNTHESIS_RECOMMENDATION_CAP)
        {
            let _ = writeln!(out, "    • {rec}");
        }
    }

    if !synthesis.insights.is_empty() {
        let _ = writeln!(out, "\n  🔍 洞察:");
        for insight in synthesis.insights.iter().take(INSIGHT_CAP) {
            let _ = writeln!(out, "    • {insight}");
        }
    }

    if report.memory.relevant_count > 0 {
        let _ = writeln!(
            out,
            "\n  🗂  相关历史记录: {}条",
            report.memory.relevant_count
        );
    }
}

/// Renders a user health summary.
pub fn render_summary(summary: &UserHealthSummary) -> String {
    format!(
        "👤 {}\n  时间范围: 最近{}天\n  相关交互: {}条\n",
        summary.user_id, summary.period_days, summary.total_interactions
    )
}

/// Interactive help text.
pub fn help_text() -> &'static str {
    "📖 使用帮助:

1. 直接输入您的健康问题，系统会自动分析
2. 命令:
   - quit/exit/q: 退出
   - summary: 查看健康摘要
   - help: 显示帮助

示例:
   💬 我最近压力很大
   💬 我运动时膝盖疼"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::MemorySnapshot;
    use crate::domain::assessment::SynthesisVerdict;
    use crate::domain::foundation::{RiskLevel, Timestamp, UserId};
    use crate::domain::synthesis::{MENTAL_CRISIS_WARNING, CLOSING_CRITICAL};

    fn report() -> HealthReport {
        HealthReport {
            timestamp: Timestamp::now(),
            user_id: UserId::new("demo").unwrap(),
            message: "我不想活了".to_string(),
            assessments: vec![
                AssessmentResult::new(AssessorKind::Mental, RiskLevel::High, 0.9),
                AssessmentResult::failed(AssessorKind::Physical, "rule table offline"),
            ],
            memory: MemorySnapshot {
                relevant_count: 2,
                recent: vec![],
            },
            synthesis: SynthesisVerdict {
                overall_status: OverallStatus::Critical,
                priority: vec![AssessorKind::Mental],
                recommendations: vec![CLOSING_CRITICAL.to_string()],
                warnings: vec![MENTAL_CRISIS_WARNING.to_string()],
                insights: vec![],
            },
            experience_id: None,
        }
    }

    #[test]
    fn rendering_shows_sections_and_degraded_entries() {
        let text = render_report(&report());
        assert!(text.contains("🧠 心理健康分析"));
        assert!(text.contains("风险等级: high"));
        assert!(text.contains("❌ 错误: rule table offline"));
        assert!(text.contains("整体健康状态: critical"));
        assert!(text.contains(MENTAL_CRISIS_WARNING));
        assert!(text.contains("相关历史记录: 2条"));
    }

    #[test]
    fn synthesis_recommendations_are_capped() {
        let mut report = report();
        report.synthesis.recommendations =
            (0..10).map(|i| format!("rec {i}")).collect();
        let text = render_report(&report);
        assert!(text.contains("rec 4"));
        assert!(!text.contains("rec 5"));
    }

    #[test]
    fn summary_renders_counts() {
        let text = render_summary(&UserHealthSummary {
            user_id: UserId::new("demo").unwrap(),
            period_days: 30,
            total_interactions: 4,
        });
        assert!(text.contains("最近30天"));
        assert!(text.contains("4条"));
    }
}
