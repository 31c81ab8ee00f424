//! Domain types shared by every Solo Arc crate.
//!
//! A request names a harmonic foundation (one of four Monk compositions), a
//! solo phase and an intensity level. The engine turns those into an
//! [`IntensityProfile`], repairs it against the coherence rules and reports
//! each repair as a [`CoherenceNote`].
//!
//! Everything here is plain data: the catalog records are immutable once
//! loaded, profiles are created per request and discarded afterwards.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod foundation;
pub mod ident;
pub mod phase;
pub mod profile;

pub use error::{CatalogKind, SoloError, SoloResult};
pub use foundation::{ComplexityClass, FoundationId, HarmonicFoundation};
pub use ident::normalize_identifier;
pub use phase::{MonkPhaseIntent, MonkPrinciple, Phase, PhaseId};
pub use profile::{
    CoherenceNote, CoherenceRule, Dimension, IntensityLevel, IntensityProfile, ValidatedProfile,
    DIMENSION_MAX, DIMENSION_MIN,
};
