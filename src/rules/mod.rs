//! Game rules for SOS
//!
//! Scoring is the only rule: a move earns one point per S-O-S sequence it
//! completes, and a scoring player keeps the turn. This module provides the
//! exact sequence count the turn loop and the search both diff against.

pub mod sos;

// Re-exports for convenient access
pub use sos::{count_sos, AXES};
