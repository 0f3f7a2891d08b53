//! Health Compass - Concurrent multi-assessor health advisory engine.
//!
//! Fans one request out to independent risk assessors (mental, physical,
//! economic), joins their results, and merges them into a single prioritized
//! verdict.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
