use serde::{Deserialize, Serialize};

use crate::error::SoloError;
use crate::foundation::ComplexityClass;

/// Lower bound of every profile dimension.
pub const DIMENSION_MIN: u8 = 1;
/// Upper bound of every profile dimension.
pub const DIMENSION_MAX: u8 = 10;

/// Requested intensity, validated to `1..=10`.
///
/// Out-of-range input is rejected rather than clamped; only derived
/// dimensions are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct IntensityLevel(u8);

impl IntensityLevel {
    pub const MIN: IntensityLevel = IntensityLevel(DIMENSION_MIN);
    pub const MAX: IntensityLevel = IntensityLevel(DIMENSION_MAX);

    pub fn new(value: i64) -> Result<Self, SoloError> {
        if (i64::from(DIMENSION_MIN)..=i64::from(DIMENSION_MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SoloError::invalid(format!(
                "intensity level {value} is outside {DIMENSION_MIN}..={DIMENSION_MAX}"
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every valid level, ascending.
    pub fn all() -> impl Iterator<Item = IntensityLevel> {
        (DIMENSION_MIN..=DIMENSION_MAX).map(IntensityLevel)
    }
}

impl TryFrom<i64> for IntensityLevel {
    type Error = SoloError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IntensityLevel> for u8 {
    fn from(level: IntensityLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One axis of an intensity profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    NoteDensity,
    RhythmicSubdivision,
    HarmonicComplexity,
    RestSpace,
    MelodicSingularity,
    TemporalDisplacement,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::NoteDensity,
        Dimension::RhythmicSubdivision,
        Dimension::HarmonicComplexity,
        Dimension::RestSpace,
        Dimension::MelodicSingularity,
        Dimension::TemporalDisplacement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::NoteDensity => "note_density",
            Dimension::RhythmicSubdivision => "rhythmic_subdivision",
            Dimension::HarmonicComplexity => "harmonic_complexity",
            Dimension::RestSpace => "rest_space",
            Dimension::MelodicSingularity => "melodic_singularity",
            Dimension::TemporalDisplacement => "temporal_displacement",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived per-request intensity vector. Every dimension lies in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntensityProfile {
    pub note_density: u8,
    pub rhythmic_subdivision: u8,
    pub harmonic_complexity: u8,
    /// Silence between phrases; inverse-coupled to note density.
    pub rest_space: u8,
    /// Phrasing clarity.
    pub melodic_singularity: u8,
    /// How far behind the beat the phrasing sits.
    pub temporal_displacement: u8,
    /// Class of the foundation the profile was derived for. Carries the
    /// harmonic floor the validator enforces.
    pub complexity_class: ComplexityClass,
}

impl IntensityProfile {
    /// Clamp a raw derived value into the dimension range.
    pub fn clamp(value: i32) -> u8 {
        value.clamp(i32::from(DIMENSION_MIN), i32::from(DIMENSION_MAX)) as u8
    }

    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::NoteDensity => self.note_density,
            Dimension::RhythmicSubdivision => self.rhythmic_subdivision,
            Dimension::HarmonicComplexity => self.harmonic_complexity,
            Dimension::RestSpace => self.rest_space,
            Dimension::MelodicSingularity => self.melodic_singularity,
            Dimension::TemporalDisplacement => self.temporal_displacement,
        }
    }

    /// Set a dimension, clamping into range.
    pub fn set(&mut self, dimension: Dimension, value: u8) {
        let value = Self::clamp(i32::from(value));
        match dimension {
            Dimension::NoteDensity => self.note_density = value,
            Dimension::RhythmicSubdivision => self.rhythmic_subdivision = value,
            Dimension::HarmonicComplexity => self.harmonic_complexity = value,
            Dimension::RestSpace => self.rest_space = value,
            Dimension::MelodicSingularity => self.melodic_singularity = value,
            Dimension::TemporalDisplacement => self.temporal_displacement = value,
        }
    }

    /// Headline intensity: mean of density, subdivision and harmonic
    /// complexity, rounded half up.
    pub fn headline(&self) -> u8 {
        let sum = u32::from(self.note_density)
            + u32::from(self.rhythmic_subdivision)
            + u32::from(self.harmonic_complexity);
        // round_half_up(sum / 3) == floor((2 * sum + 3) / 6)
        Self::clamp(((2 * sum + 3) / 6) as i32)
    }
}

/// Identifier of a cross-dimensional coherence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceRule {
    IntensityRequiresClarity,
    ComplexityDrivesPhrasing,
    DisplacementNeedsAnchor,
    ComplexityClassFloor,
}

impl CoherenceRule {
    pub fn as_str(self) -> &'static str {
        match self {
            CoherenceRule::IntensityRequiresClarity => "intensity_requires_clarity",
            CoherenceRule::ComplexityDrivesPhrasing => "complexity_drives_phrasing",
            CoherenceRule::DisplacementNeedsAnchor => "displacement_needs_anchor",
            CoherenceRule::ComplexityClassFloor => "complexity_class_floor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CoherenceRule::IntensityRequiresClarity => {
                "high note density requires rest space for legibility"
            }
            CoherenceRule::ComplexityDrivesPhrasing => {
                "high harmonic complexity requires clear melodic phrasing"
            }
            CoherenceRule::DisplacementNeedsAnchor => {
                "behind-the-beat phrasing needs a harmonic anchor"
            }
            CoherenceRule::ComplexityClassFloor => {
                "harmonic complexity cannot drop below the foundation's class floor"
            }
        }
    }
}

impl std::fmt::Display for CoherenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one automatic repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoherenceNote {
    pub rule: CoherenceRule,
    pub dimension: Dimension,
    /// Minimum the rule demanded.
    pub required: u8,
    pub before: u8,
    pub after: u8,
}

impl std::fmt::Display for CoherenceNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} raised {} -> {} ({})",
            self.rule,
            self.dimension,
            self.before,
            self.after,
            self.rule.description()
        )
    }
}

/// A profile that satisfies every coherence rule, with the repairs that got it there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedProfile {
    pub profile: IntensityProfile,
    pub notes: Vec<CoherenceNote>,
}

impl ValidatedProfile {
    /// True when the raw profile needed no repair.
    pub fn is_coherent(&self) -> bool {
        self.notes.is_empty()
    }
}
