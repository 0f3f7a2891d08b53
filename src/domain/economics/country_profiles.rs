//! Static country health reference data.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// World Bank income classification of a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeLevel {
    Low,
    LowerMiddle,
    UpperMiddle,
    High,
}

impl IncomeLevel {
    /// Stable string form used in serialized summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeLevel::Low => "low",
            IncomeLevel::LowerMiddle => "lower_middle",
            IncomeLevel::UpperMiddle => "upper_middle",
            IncomeLevel::High => "high",
        }
    }
}

/// Health and economic reference profile of one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryHealthProfile {
    pub country_code: &'static str,
    pub country_name: &'static str,
    pub income_level: IncomeLevel,

    // Healthcare resources, all in [0, 1].
    pub healthcare_accessibility: f64,
    pub healthcare_quality: f64,
    pub public_healthcare_coverage: f64,

    // Health indicators.
    pub life_expectancy: f64,
    pub infant_mortality_rate: f64,
    pub health_expenditure_gdp: f64,

    // Economic indicators.
    pub gdp_per_capita: f64,
    pub poverty_rate: f64,

    pub common_health_issues: &'static [&'static str],
    pub healthcare_system_type: &'static str,
    pub cultural_health_beliefs: &'static [&'static str],
}

static COUNTRY_DATABASE: Lazy<HashMap<&'static str, CountryHealthProfile>> = Lazy::new(|| {
    let mut db = HashMap::new();

    db.insert(
        "US",
        CountryHealthProfile {
            country_code: "US",
            country_name: "United States",
            income_level: IncomeLevel::High,
            healthcare_accessibility: 0.7,
            healthcare_quality: 0.9,
            public_healthcare_coverage: 0.5,
            life_expectancy: 78.5,
            infant_mortality_rate: 5.7,
            health_expenditure_gdp: 17.8,
            gdp_per_capita: 63000.0,
            poverty_rate: 11.8,
            common_health_issues: &["obesity", "diabetes", "heart_disease", "mental_health"],
            healthcare_system_type: "mixed",
            cultural_health_beliefs: &["preventive_care", "fitness_culture"],
        },
    );

    db.insert(
        "CN",
        CountryHealthProfile {
            country_code: "CN",
            country_name: "China",
            income_level: IncomeLevel::UpperMiddle,
            healthcare_accessibility: 0.8,
            healthcare_quality: 0.75,
            public_healthcare_coverage: 0.95,
            life_expectancy: 77.0,
            infant_mortality_rate: 6.8,
            health_expenditure_gdp: 5.4,
            gdp_per_capita: 10500.0,
            poverty_rate: 0.6,
            common_health_issues: &["respiratory_disease", "diabetes", "hypertension", "cancer"],
            healthcare_system_type: "public_dominant",
            cultural_health_beliefs: &["traditional_medicine", "preventive_care"],
        },
    );

    db.insert(
        "IN",
        CountryHealthProfile {
            country_code: "IN",
            country_name: "India",
            income_level: IncomeLevel::LowerMiddle,
            healthcare_accessibility: 0.5,
            healthcare_quality: 0.6,
            public_healthcare_coverage: 0.3,
            life_expectancy: 70.0,
            infant_mortality_rate: 28.3,
            health_expenditure_gdp: 3.5,
            gdp_per_capita: 2100.0,
            poverty_rate: 21.9,
            common_health_issues: &["infectious_disease", "malnutrition", "diabetes", "tuberculosis"],
            healthcare_system_type: "mixed",
            cultural_health_beliefs: &["ayurveda", "yoga", "traditional_medicine"],
        },
    );

    db.insert(
        "BR",
        CountryHealthProfile {
            country_code: "BR",
            country_name: "Brazil",
            income_level: IncomeLevel::UpperMiddle,
            healthcare_accessibility: 0.7,
            healthcare_quality: 0.7,
            public_healthcare_coverage: 0.8,
            life_expectancy: 75.5,
            infant_mortality_rate: 12.4,
            health_expenditure_gdp: 9.6,
            gdp_per_capita: 8500.0,
            poverty_rate: 21.4,
            common_health_issues: &["dengue", "diabetes", "hypertension", "mental_health"],
            healthcare_system_type: "public_universal",
            cultural_health_beliefs: &["preventive_care", "community_health"],
        },
    );

    db
});

/// Looks up a country profile by code, case-insensitive.
pub fn country_profile(country_code: &str) -> Option<&'static CountryHealthProfile> {
    COUNTRY_DATABASE.get(country_code.to_uppercase().as_str())
}
