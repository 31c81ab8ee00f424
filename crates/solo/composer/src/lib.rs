//! Enhancement composer for Solo Arc.
//!
//! Consumes a validated [`IntensityProfile`](solo_types::IntensityProfile)
//! and a caller's base description and produces prompt prose. The
//! [`Composer`] trait is the seam; [`TemplateComposer`] fills a fixed
//! sentence template from the catalog records. [`Enhancer`] ties a composer
//! to the [`IntensityEngine`](solo_engine::IntensityEngine) for whole
//! requests.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod composer;
pub mod descriptor;
pub mod enhancement;

pub use composer::{ComposeOptions, Composer, TemplateComposer};
pub use descriptor::{describe, descriptor_for, INTENSITY_DESCRIPTORS};
pub use enhancement::{
    Enhancement, EnhancementRequest, Enhancer, DEFAULT_FOUNDATION, DEFAULT_INTENSITY_LEVEL,
    DEFAULT_PHASE, TEMPORAL_NOTE,
};
