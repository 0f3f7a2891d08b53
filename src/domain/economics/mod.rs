//! Economic accessibility rules and country reference data.
//!
//! Pure functions over a static country table. The economic dimension never
//! escalates the overall status; its outputs feed warnings and insights only.

mod country_profiles;
mod rules;

pub use country_profiles::{country_profile, CountryHealthProfile, IncomeLevel};
pub use rules::{analyze, EconomicAnalysis};
