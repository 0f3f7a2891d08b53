//! Assessor implementations.
//!
//! Each assessor wraps the corresponding domain rule table; the mental
//! assessor additionally drafts its response through the text generation
//! port. All three implement the same capability interface the pool runs.

mod economic;
mod mental;
mod physical;

pub use economic::EconomicHealthAssessor;
pub use mental::MentalHealthAssessor;
pub use physical::PhysicalHealthAssessor;
