use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CatalogKind, SoloError, SoloResult};
use crate::ident::normalize_identifier;

/// The four Monk compositions a solo can be anchored on, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FoundationId {
    #[serde(rename = "Round Midnight")]
    RoundMidnight,
    #[serde(rename = "Evidence")]
    Evidence,
    #[serde(rename = "Epistrophy")]
    Epistrophy,
    #[serde(rename = "Ask Me Now")]
    AskMeNow,
}

impl FoundationId {
    pub const ALL: [FoundationId; 4] = [
        FoundationId::RoundMidnight,
        FoundationId::Evidence,
        FoundationId::Epistrophy,
        FoundationId::AskMeNow,
    ];

    /// Display name, as used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            FoundationId::RoundMidnight => "Round Midnight",
            FoundationId::Evidence => "Evidence",
            FoundationId::Epistrophy => "Epistrophy",
            FoundationId::AskMeNow => "Ask Me Now",
        }
    }

    /// Resolve a caller-supplied identifier (case-insensitive, whitespace-normalized).
    pub fn parse(raw: &str) -> SoloResult<Self> {
        let normalized = normalize_identifier(raw)?;
        Self::ALL
            .into_iter()
            .find(|id| id.name().to_lowercase() == normalized)
            .ok_or_else(|| SoloError::not_found(CatalogKind::Foundation, raw.trim()))
    }
}

impl FromStr for FoundationId {
    type Err = SoloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FoundationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordinal ranking of a foundation's inherent harmonic difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityClass {
    LyricalSimple,
    ModalRepetition,
    BebopDense,
    AngularChromatic,
}

impl ComplexityClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityClass::LyricalSimple => "lyrical_simple",
            ComplexityClass::ModalRepetition => "modal_repetition",
            ComplexityClass::BebopDense => "bebop_dense",
            ComplexityClass::AngularChromatic => "angular_chromatic",
        }
    }

    /// Added to the requested level when deriving harmonic complexity.
    pub fn harmonic_offset(self) -> u8 {
        match self {
            ComplexityClass::LyricalSimple => 0,
            ComplexityClass::ModalRepetition => 1,
            ComplexityClass::BebopDense => 2,
            ComplexityClass::AngularChromatic => 3,
        }
    }

    /// Lowest harmonic complexity a profile on this class may carry.
    pub fn harmonic_floor(self) -> u8 {
        match self {
            ComplexityClass::LyricalSimple => 1,
            ComplexityClass::ModalRepetition => 2,
            ComplexityClass::BebopDense => 3,
            ComplexityClass::AngularChromatic => 5,
        }
    }
}

impl std::fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named composition providing the harmonic ground of a solo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonicFoundation {
    pub id: FoundationId,
    pub complexity: ComplexityClass,
    pub key_center: String,
    pub characteristic: String,
    #[serde(default)]
    pub monk_essence: bool,
}

impl HarmonicFoundation {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}
