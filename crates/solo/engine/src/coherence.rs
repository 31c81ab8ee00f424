//! Coherence validation with floor-raising repair.
//!
//! Each rule is a row in [`RULES`]: when its trigger holds, the repaired
//! dimension must be at least the rule's minimum. Validation evaluates every
//! trigger against the incoming profile, then raises each dimension to the
//! largest minimum demanded of it in a single pass. Driving dimensions are
//! never lowered, so repair cannot fail.
//!
//! New rules are added by extending the table.

use std::collections::BTreeMap;

use solo_types::{CoherenceNote, CoherenceRule, Dimension, IntensityProfile, ValidatedProfile};
use tracing::debug;

/// A single cross-dimensional constraint.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub rule: CoherenceRule,
    pub repairs: Dimension,
    /// Whether the rule applies to this profile.
    pub trigger: fn(&IntensityProfile) -> bool,
    /// Minimum the repaired dimension must reach when triggered.
    pub minimum: fn(&IntensityProfile) -> u8,
}

fn dense(p: &IntensityProfile) -> bool {
    p.note_density >= 7
}

fn harmonically_complex(p: &IntensityProfile) -> bool {
    p.harmonic_complexity >= 7
}

fn displaced(p: &IntensityProfile) -> bool {
    p.temporal_displacement >= 6
}

fn always(_: &IntensityProfile) -> bool {
    true
}

fn six(_: &IntensityProfile) -> u8 {
    6
}

fn five(_: &IntensityProfile) -> u8 {
    5
}

fn class_floor(p: &IntensityProfile) -> u8 {
    p.complexity_class.harmonic_floor()
}

pub const RULES: &[RuleSpec] = &[
    RuleSpec {
        rule: CoherenceRule::IntensityRequiresClarity,
        repairs: Dimension::RestSpace,
        trigger: dense,
        minimum: six,
    },
    RuleSpec {
        rule: CoherenceRule::ComplexityDrivesPhrasing,
        repairs: Dimension::MelodicSingularity,
        trigger: harmonically_complex,
        minimum: six,
    },
    RuleSpec {
        rule: CoherenceRule::DisplacementNeedsAnchor,
        repairs: Dimension::HarmonicComplexity,
        trigger: displaced,
        minimum: five,
    },
    RuleSpec {
        rule: CoherenceRule::ComplexityClassFloor,
        repairs: Dimension::HarmonicComplexity,
        trigger: always,
        minimum: class_floor,
    },
];

/// Rules the profile currently breaks, in table order.
pub fn violations(profile: &IntensityProfile) -> Vec<CoherenceRule> {
    RULES
        .iter()
        .filter(|spec| {
            (spec.trigger)(profile) && profile.get(spec.repairs) < (spec.minimum)(profile)
        })
        .map(|spec| spec.rule)
        .collect()
}

pub fn is_coherent(profile: &IntensityProfile) -> bool {
    violations(profile).is_empty()
}

/// Repair a profile so every rule holds, noting each repair.
pub fn validate(profile: IntensityProfile) -> ValidatedProfile {
    let triggered: Vec<(&RuleSpec, u8)> = RULES
        .iter()
        .filter(|spec| (spec.trigger)(&profile))
        .map(|spec| (spec, (spec.minimum)(&profile)))
        .collect();

    let mut targets: BTreeMap<Dimension, u8> = BTreeMap::new();
    for (spec, minimum) in &triggered {
        let target = targets
            .entry(spec.repairs)
            .or_insert_with(|| profile.get(spec.repairs));
        *target = (*target).max(*minimum);
    }

    let mut repaired = profile;
    for (dimension, target) in &targets {
        repaired.set(*dimension, *target);
    }

    let notes: Vec<CoherenceNote> = triggered
        .iter()
        .filter(|(spec, minimum)| profile.get(spec.repairs) < *minimum)
        .map(|(spec, minimum)| CoherenceNote {
            rule: spec.rule,
            dimension: spec.repairs,
            required: *minimum,
            before: profile.get(spec.repairs),
            after: repaired.get(spec.repairs),
        })
        .collect();

    for note in &notes {
        debug!(
            rule = %note.rule,
            dimension = %note.dimension,
            before = note.before,
            after = note.after,
            "Coherence repair applied"
        );
    }

    ValidatedProfile {
        profile: repaired,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solo_types::ComplexityClass;

    fn profile() -> IntensityProfile {
        IntensityProfile {
            note_density: 5,
            rhythmic_subdivision: 5,
            harmonic_complexity: 5,
            rest_space: 6,
            melodic_singularity: 5,
            temporal_displacement: 5,
            complexity_class: ComplexityClass::LyricalSimple,
        }
    }

    #[test]
    fn coherent_profile_is_untouched() {
        let p = profile();
        let validated = validate(p);
        assert_eq!(validated.profile, p);
        assert!(validated.is_coherent());
        assert!(is_coherent(&p));
    }

    #[test]
    fn dense_profile_gets_rest_space() {
        let mut p = profile();
        p.note_density = 8;
        p.rest_space = 3;
        assert_eq!(violations(&p), vec![CoherenceRule::IntensityRequiresClarity]);

        let validated = validate(p);
        assert_eq!(validated.profile.rest_space, 6);
        assert_eq!(validated.profile.note_density, 8);
        assert_eq!(
            validated.notes,
            vec![CoherenceNote {
                rule: CoherenceRule::IntensityRequiresClarity,
                dimension: Dimension::RestSpace,
                required: 6,
                before: 3,
                after: 6,
            }]
        );
    }

    #[test]
    fn complex_harmony_gets_clear_phrasing() {
        let mut p = profile();
        p.harmonic_complexity = 9;
        p.melodic_singularity = 2;
        let validated = validate(p);
        assert_eq!(validated.profile.melodic_singularity, 6);
        assert_eq!(validated.profile.harmonic_complexity, 9);
        assert_eq!(validated.notes[0].rule, CoherenceRule::ComplexityDrivesPhrasing);
    }

    #[test]
    fn displacement_raises_harmonic_anchor() {
        let mut p = profile();
        p.temporal_displacement = 8;
        p.harmonic_complexity = 2;
        let validated = validate(p);
        assert_eq!(validated.profile.harmonic_complexity, 5);
        assert_eq!(validated.profile.temporal_displacement, 8);
    }

    #[test]
    fn class_floor_raises_harmonic_complexity() {
        let mut p = profile();
        p.complexity_class = ComplexityClass::AngularChromatic;
        p.harmonic_complexity = 3;
        let validated = validate(p);
        assert_eq!(validated.profile.harmonic_complexity, 5);
        assert_eq!(validated.notes.len(), 1);
        assert_eq!(validated.notes[0].rule, CoherenceRule::ComplexityClassFloor);
        assert_eq!(validated.notes[0].before, 3);
        assert_eq!(validated.notes[0].after, 5);
    }

    #[test]
    fn competing_minimums_take_the_maximum_in_one_pass() {
        let mut p = profile();
        p.complexity_class = ComplexityClass::BebopDense;
        p.temporal_displacement = 7;
        p.harmonic_complexity = 1;
        let validated = validate(p);

        // anchor demands 5, bebop floor demands 3
        assert_eq!(validated.profile.harmonic_complexity, 5);
        assert_eq!(validated.notes.len(), 2);
        assert!(validated.notes.iter().all(|n| n.before == 1 && n.after == 5));
        assert_eq!(validated.notes[0].rule, CoherenceRule::DisplacementNeedsAnchor);
        assert_eq!(validated.notes[0].required, 5);
        assert_eq!(validated.notes[1].rule, CoherenceRule::ComplexityClassFloor);
        assert_eq!(validated.notes[1].required, 3);
    }

    #[test]
    fn validation_is_idempotent() {
        let mut p = profile();
        p.note_density = 10;
        p.rest_space = 1;
        p.harmonic_complexity = 8;
        p.melodic_singularity = 1;
        let once = validate(p);
        let twice = validate(once.profile);
        assert_eq!(twice.profile, once.profile);
        assert!(twice.notes.is_empty());
    }
}
