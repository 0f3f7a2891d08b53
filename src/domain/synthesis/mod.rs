//! Synthesis - pure merge of assessor results into one verdict.
//!
//! No I/O, no randomness, no clock: the verdict is a deterministic function
//! of the result set and the memory hits, which is what makes the merge
//! rules testable in isolation.

mod engine;

pub use engine::SynthesisEngine;
pub use engine::{
    CLOSING_ATTENTION, CLOSING_CRITICAL, CLOSING_GOOD, ECONOMIC_BARRIER_WARNING,
    GOOD_ACCESSIBILITY_INSIGHT, LOW_ACCESSIBILITY_WARNING, MENTAL_CRISIS_WARNING,
    PHYSICAL_INJURY_WARNING,
};
