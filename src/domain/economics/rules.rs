//! Economic health analysis rules.

use serde::{Deserialize, Serialize};

use super::country_profiles::{country_profile, CountryHealthProfile};
use crate::domain::assessment::{
    AccessibilityAssessment, CountrySummary, IncomeAssessment, RelativeIncomeLevel,
};

/// World Bank annual income thresholds in USD.
const WORLD_BANK_LOW: f64 = 1045.0;
const WORLD_BANK_LOWER_MIDDLE: f64 = 4095.0;
const WORLD_BANK_UPPER_MIDDLE: f64 = 12695.0;

/// Full outcome of the economic rule table for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicAnalysis {
    pub income: IncomeAssessment,
    pub accessibility: Option<AccessibilityAssessment>,
    pub barriers: Vec<String>,
    pub opportunities: Vec<String>,
    pub recommendations: Vec<String>,
    pub country: Option<CountrySummary>,
}

/// Analyzes economic factors affecting health access.
///
/// Pure: the only data source besides the arguments is the static country
/// table.
pub fn analyze(
    income: Option<f64>,
    country_code: Option<&str>,
    health_concerns: &[String],
) -> EconomicAnalysis {
    let profile = country_code.and_then(country_profile);

    let income_assessment = assess_income(income, profile);
    let accessibility = profile.map(|p| assess_accessibility(income, p));
    let barriers = identify_barriers(income, profile, health_concerns);
    let opportunities = identify_opportunities(income, profile);
    let recommendations = generate_recommendations(income, profile);

    EconomicAnalysis {
        income: income_assessment,
        accessibility,
        barriers,
        opportunities,
        recommendations,
        country: profile.map(|p| CountrySummary {
            code: p.country_code.to_string(),
            name: p.country_name.to_string(),
            income_level: p.income_level.as_str().to_string(),
            gdp_per_capita: p.gdp_per_capita,
        }),
    }
}

fn assess_income(
    income: Option<f64>,
    profile: Option<&'static CountryHealthProfile>,
) -> IncomeAssessment {
    let mut assessment = IncomeAssessment {
        income,
        ..IncomeAssessment::default()
    };

    let Some(income) = income else {
        return assessment;
    };

    if let Some(profile) = profile {
        let gdp = profile.gdp_per_capita;
        assessment.relative_level = if income < gdp * 0.5 {
            RelativeIncomeLevel::Low
        } else if income < gdp {
            RelativeIncomeLevel::BelowAverage
        } else if income < gdp * 1.5 {
            RelativeIncomeLevel::Average
        } else if income < gdp * 2.0 {
            RelativeIncomeLevel::AboveAverage
        } else {
            RelativeIncomeLevel::High
        };

        assessment.can_afford_healthcare = Some(can_afford_healthcare(income, profile));
        assessment.can_afford_preventive_care = Some(can_afford_healthcare(income, profile));
        assessment.can_afford_mental_health = Some(can_afford_mental_health(income, profile));
    } else {
        assessment.relative_level = if income < WORLD_BANK_LOW {
            RelativeIncomeLevel::VeryLow
        } else if income < WORLD_BANK_LOWER_MIDDLE {
            RelativeIncomeLevel::Low
        } else if income < WORLD_BANK_UPPER_MIDDLE {
            RelativeIncomeLevel::Middle
        } else {
            RelativeIncomeLevel::High
        };
    }

    assessment
}

/// High public coverage makes routine care affordable outright; otherwise the
/// estimated out-of-pocket cost (15% of income) must leave a living margin.
fn can_afford_healthcare(income: f64, profile: &CountryHealthProfile) -> bool {
    if profile.public_healthcare_coverage > 0.8 {
        return true;
    }
    let estimated_healthcare_cost = income * 0.15;
    income - estimated_healthcare_cost > profile.gdp_per_capita * 0.3
}

/// Mental-health services cost more and are covered less.
fn can_afford_mental_health(income: f64, profile: &CountryHealthProfile) -> bool {
    if profile.public_healthcare_coverage > 0.9 {
        return true;
    }
    income > 10000.0
}

fn assess_accessibility(
    income: Option<f64>,
    profile: &'static CountryHealthProfile,
) -> AccessibilityAssessment {
    let country_system = profile.healthcare_accessibility;
    let public_coverage = profile.public_healthcare_coverage;

    let mut barriers = Vec::new();
    let income_factor = match income {
        Some(income) => {
            let factor = (income / profile.gdp_per_capita).min(1.0);
            if factor < 0.5 {
                barriers.push("收入不足影响医疗可及性".to_string());
            }
            factor
        }
        None => 0.5,
    };

    let overall_score = country_system * 0.4 + income_factor * 0.3 + public_coverage * 0.3;

    AccessibilityAssessment {
        overall_score,
        country_system,
        income_factor,
        public_coverage,
        barriers,
    }
}

fn identify_barriers(
    income: Option<f64>,
    profile: Option<&'static CountryHealthProfile>,
    health_concerns: &[String],
) -> Vec<String> {
    let mut barriers = Vec::new();

    let Some(income) = income else {
        barriers.push("收入信息未知，无法准确评估经济障碍".to_string());
        return barriers;
    };

    let Some(profile) = profile else {
        if income < 5000.0 {
            barriers.push("低收入可能限制医疗选择".to_string());
        }
        return barriers;
    };

    if income < profile.gdp_per_capita * 0.5 {
        barriers.push("收入远低于国家平均水平，可能难以负担医疗费用".to_string());
        barriers.push("可能无法获得优质医疗服务".to_string());
    }

    if profile.public_healthcare_coverage < 0.5 {
        barriers.push("公共医保覆盖率低，需要自费医疗".to_string());
    }

    if income < 10000.0 && health_concerns.iter().any(|c| c == "mental_health") {
        barriers.push("心理健康服务费用较高，可能难以负担".to_string());
    }

    if profile.healthcare_accessibility < 0.6 {
        barriers.push("国家医疗可及性较低".to_string());
    }

    barriers
}

fn identify_opportunities(
    income: Option<f64>,
    profile: Option<&'static CountryHealthProfile>,
) -> Vec<String> {
    let mut opportunities = Vec::new();

    let Some(profile) = profile else {
        return opportunities;
    };

    if profile.public_healthcare_coverage > 0.8 {
        opportunities.push("国家提供高覆盖率的公共医保".to_string());
        opportunities.push("可以优先使用公共医疗服务".to_string());
    }

    if profile.healthcare_accessibility > 0.7 {
        opportunities.push("医疗可及性较高，可以方便获得预防性医疗".to_string());
    }

    if !profile.cultural_health_beliefs.is_empty() {
        opportunities.push(format!(
            "可以利用文化健康资源: {}",
            profile.cultural_health_beliefs.join(", ")
        ));
    }

    if let Some(income) = income {
        if income > profile.gdp_per_capita {
            opportunities.push("收入高于平均水平，有更多医疗选择".to_string());
        }
    }

    opportunities
}

fn generate_recommendations(
    income: Option<f64>,
    profile: Option<&'static CountryHealthProfile>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let Some(profile) = profile else {
        if let Some(income) = income {
            if income < 5000.0 {
                recommendations.push("💡 建议优先使用公共医疗资源".to_string());
                recommendations.push("💡 寻找社区健康服务和免费筛查项目".to_string());
            }
        }
        return recommendations;
    };

    if profile.public_healthcare_coverage > 0.8 {
        recommendations.push("✅ 优先使用公共医保系统，可以大幅降低医疗成本".to_string());
    }

    if profile.healthcare_accessibility < 0.6 {
        recommendations.push("⚠️ 医疗可及性较低，建议提前规划医疗需求".to_string());
    }

    if let Some(income) = income {
        let gdp = profile.gdp_per_capita;
        if income < gdp * 0.5 {
            recommendations.push("💰 收入较低，建议：".to_string());
            recommendations.push("充分利用公共医疗资源".to_string());
            recommendations.push("寻找免费或低成本的健康筛查".to_string());
            recommendations.push("关注预防性医疗，避免昂贵治疗".to_string());
            recommendations.push("考虑社区健康服务".to_string());
        } else if income < gdp {
            recommendations.push("💰 收入中等，建议：".to_string());
            recommendations.push("平衡使用公共和私人医疗".to_string());
            recommendations.push("考虑购买补充医疗保险".to_string());
            recommendations.push("定期进行健康检查".to_string());
        } else {
            recommendations.push("💰 收入较高，建议：".to_string());
            recommendations.push("可以选择优质医疗服务".to_string());
            recommendations.push("投资预防性医疗和健康管理".to_string());
            recommendations.push("考虑私人医疗保险以获得更好服务".to_string());
        }
    }

    if profile.cultural_health_beliefs.contains(&"traditional_medicine") {
        recommendations.push("🌿 可以考虑结合传统医学和现代医疗".to_string());
    }
    if profile.cultural_health_beliefs.contains(&"preventive_care") {
        recommendations.push("🛡️ 重视预防性医疗，这是成本效益最高的健康投资".to_string());
    }

    if profile.common_health_issues.contains(&"diabetes") {
        recommendations.push("⚠️ 注意糖尿病预防，这是本地区常见健康问题".to_string());
    }
    if profile.common_health_issues.contains(&"mental_health") {
        if income.is_some_and(|i| i > profile.gdp_per_capita) {
            recommendations.push("🧠 考虑投资心理健康服务".to_string());
        } else {
            recommendations.push("🧠 寻找社区心理健康资源或在线咨询服务".to_string());
        }
    }

    recommendations
}
