//! Intensity engine for Solo Arc.
//!
//! Two independent steps and a façade over them:
//!
//! 1. [`synthesizer::synthesize`] derives a raw [`IntensityProfile`] from a
//!    foundation, a phase and a level. It does not enforce coherence.
//! 2. [`coherence::validate`] raises dependent dimensions until every
//!    coherence rule holds, noting each repair.
//! 3. [`IntensityEngine`] resolves caller identifiers against the
//!    [`Registry`](solo_registry::Registry) and runs both steps.
//!
//! All of it is synchronous and pure; the registry is the only shared state
//! and it is read-only.
//!
//! [`IntensityProfile`]: solo_types::IntensityProfile

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod coherence;
pub mod engine;
pub mod synthesizer;

pub use coherence::{is_coherent, validate, violations, RuleSpec, RULES};
pub use engine::{
    Catalog, IntensityEngine, PhaseComparison, ProfileReport, DEFAULT_COMPARISON_LEVEL,
};
pub use synthesizer::synthesize;
