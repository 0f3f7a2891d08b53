//! Assessment data model.
//!
//! The immutable shapes that flow through one request: the request itself,
//! one result per assessor, the memory hits consulted during synthesis, and
//! the final verdict.

mod memory;
mod request;
mod result;
mod verdict;

pub use memory::{MemoryHit, StoredExperience};
pub use request::{AssessmentContext, AssessmentRequest, TrainingData};
pub use result::{
    AccessibilityAssessment, AssessmentDetails, AssessmentResult, CountrySummary,
    IncomeAssessment, RelativeIncomeLevel, SymptomSeverity,
};
pub use verdict::SynthesisVerdict;
