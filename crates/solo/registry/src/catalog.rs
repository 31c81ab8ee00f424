//! Catalog document format and validation.
//!
//! The catalog is a JSON document with three arrays: `foundations`, `phases`
//! and `principles`. A copy ships inside the crate; deployments may point at
//! their own file. Whatever the source, the document is validated in full
//! before a [`Registry`](crate::Registry) is built from it, and any problem is
//! fatal.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use solo_types::{FoundationId, HarmonicFoundation, MonkPrinciple, Phase, PhaseId};
use thiserror::Error;

/// Catalog shipped with the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("foundation {0} is declared more than once")]
    DuplicateFoundation(FoundationId),

    #[error("foundation {0} is missing from the catalog")]
    MissingFoundation(FoundationId),

    #[error("phase {0} is declared more than once")]
    DuplicatePhase(PhaseId),

    #[error("phase {0} is missing from the catalog")]
    MissingPhase(PhaseId),

    #[error("phase {phase} declares ordinal {declared}, expected {expected}")]
    OrdinalMismatch {
        phase: PhaseId,
        declared: u8,
        expected: u8,
    },

    #[error("{record}: field `{field}` must not be empty")]
    EmptyField { record: String, field: &'static str },

    #[error("monk principle `{0}` is declared more than once")]
    DuplicatePrinciple(String),
}

/// Raw catalog document as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub foundations: Vec<HarmonicFoundation>,
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub principles: Vec<MonkPrinciple>,
}

impl CatalogDocument {
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check completeness, uniqueness, ordinals and required text.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for foundation in &self.foundations {
            if !seen.insert(foundation.id) {
                return Err(RegistryError::DuplicateFoundation(foundation.id));
            }
            let record = format!("foundation {}", foundation.id);
            require_text(&record, "key_center", &foundation.key_center)?;
            require_text(&record, "characteristic", &foundation.characteristic)?;
        }
        if let Some(missing) = FoundationId::ALL.into_iter().find(|id| !seen.contains(id)) {
            return Err(RegistryError::MissingFoundation(missing));
        }

        let mut seen = HashSet::new();
        for phase in &self.phases {
            if !seen.insert(phase.id) {
                return Err(RegistryError::DuplicatePhase(phase.id));
            }
            if phase.ordinal != phase.id.ordinal() {
                return Err(RegistryError::OrdinalMismatch {
                    phase: phase.id,
                    declared: phase.ordinal,
                    expected: phase.id.ordinal(),
                });
            }
            let record = format!("phase {}", phase.id);
            require_text(&record, "epistemic_role", &phase.epistemic_role)?;
            require_text(&record, "sensory_intention", &phase.sensory_intention)?;
            require_text(&record, "visual_treatment", &phase.visual_treatment)?;
            require_text(&record, "how_it_feels", &phase.how_it_feels)?;
        }
        if let Some(missing) = PhaseId::ALL.into_iter().find(|id| !seen.contains(id)) {
            return Err(RegistryError::MissingPhase(missing));
        }

        let mut seen = HashSet::new();
        for principle in &self.principles {
            require_text("monk principle", "key", &principle.key)?;
            if !seen.insert(principle.key.as_str()) {
                return Err(RegistryError::DuplicatePrinciple(principle.key.clone()));
            }
            let record = format!("monk principle {}", principle.key);
            require_text(&record, "statement", &principle.statement)?;
        }

        Ok(())
    }
}

fn require_text(record: &str, field: &'static str, value: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::EmptyField {
            record: record.to_string(),
            field,
        });
    }
    Ok(())
}
