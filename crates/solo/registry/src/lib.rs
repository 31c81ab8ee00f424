//! Reference registry for Solo Arc.
//!
//! Holds the static catalog every request is resolved against: the four
//! harmonic foundations, the three solo phases and Monk's anchor principles.
//! The catalog is loaded and validated once at startup; a bad catalog is a
//! startup failure, never a degraded mode.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod catalog;
pub mod registry;

pub use catalog::{CatalogDocument, RegistryError, BUILTIN_CATALOG};
pub use registry::Registry;
