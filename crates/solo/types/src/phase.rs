use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CatalogKind, SoloError, SoloResult};
use crate::ident::normalize_identifier;

/// The three temporal stages of a solo, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    Statement,
    Development,
    Resolution,
}

impl PhaseId {
    pub const ALL: [PhaseId; 3] = [PhaseId::Statement, PhaseId::Development, PhaseId::Resolution];

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseId::Statement => "statement",
            PhaseId::Development => "development",
            PhaseId::Resolution => "resolution",
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            PhaseId::Statement => 0,
            PhaseId::Development => 1,
            PhaseId::Resolution => 2,
        }
    }

    pub fn parse(raw: &str) -> SoloResult<Self> {
        let normalized = normalize_identifier(raw)?;
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| SoloError::not_found(CatalogKind::Phase, raw.trim()))
    }
}

impl FromStr for PhaseId {
    type Err = SoloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monk's visual and sonic reading of a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonkPhaseIntent {
    pub visual: String,
    pub sonic: String,
}

/// Phase specification from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub ordinal: u8,
    /// What the phase does for the listener's understanding.
    pub epistemic_role: String,
    pub sensory_intention: String,
    pub visual_treatment: String,
    pub how_it_feels: String,
    /// Visual-treatment keywords, most characteristic first. May contain
    /// `{foundation}` and `{characteristic}` placeholders.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monk: Option<MonkPhaseIntent>,
}

/// One of Monk's anchor principles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonkPrinciple {
    pub key: String,
    pub statement: String,
    pub manifests_as: String,
}
