//! Raw profile derivation.
//!
//! A pure function of foundation, phase and level. The result may still
//! break coherence rules; repairs belong to [`crate::coherence`].

use solo_types::{HarmonicFoundation, IntensityLevel, IntensityProfile, Phase, PhaseId};
use tracing::trace;

/// Integer division rounding half up. Inputs are non-negative.
fn round_half_up(numerator: u8, denominator: u8) -> u8 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// Half a value, rounded half up, never below 1.
fn half(value: u8) -> u8 {
    round_half_up(value, 2).max(1)
}

/// Density for a phase: restrained in statement, full in development, the
/// midpoint of the two in resolution.
fn phase_density(phase: PhaseId, level: u8) -> u8 {
    match phase {
        PhaseId::Statement => half(level),
        PhaseId::Development => level,
        PhaseId::Resolution => round_half_up(half(level) + level, 2),
    }
}

/// Derive the raw intensity profile for one request.
pub fn synthesize(
    foundation: &HarmonicFoundation,
    phase: &Phase,
    level: IntensityLevel,
) -> IntensityProfile {
    let l = level.get();
    let class = foundation.complexity;

    let harmonic_complexity = (l + class.harmonic_offset())
        .clamp(class.harmonic_floor(), solo_types::DIMENSION_MAX);

    let density = IntensityProfile::clamp(i32::from(phase_density(phase.id, l)));
    let rest_space = IntensityProfile::clamp(11 - i32::from(density));

    let melodic_singularity =
        IntensityProfile::clamp(i32::from(l.max(harmonic_complexity.saturating_sub(1))));

    let displacement = match phase.id {
        PhaseId::Statement => half(l),
        PhaseId::Development => l,
        PhaseId::Resolution => l.min(harmonic_complexity),
    };

    let profile = IntensityProfile {
        note_density: density,
        rhythmic_subdivision: density,
        harmonic_complexity,
        rest_space,
        melodic_singularity,
        temporal_displacement: IntensityProfile::clamp(i32::from(displacement)),
        complexity_class: class,
    };

    trace!(
        foundation = foundation.name(),
        phase = %phase.id,
        level = l,
        ?profile,
        "Synthesized raw profile"
    );

    profile
}
