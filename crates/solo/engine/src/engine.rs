use std::sync::Arc;

use serde::{Deserialize, Serialize};
use solo_registry::Registry;
use solo_types::{
    CoherenceNote, FoundationId, HarmonicFoundation, IntensityLevel, IntensityProfile,
    MonkPrinciple, Phase, PhaseId, SoloResult,
};
use tracing::debug;

use crate::coherence::validate;
use crate::synthesizer::synthesize;

/// Level used when a comparison does not name one.
pub const DEFAULT_COMPARISON_LEVEL: u8 = 5;

/// Validated profile for one request, with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub foundation: FoundationId,
    pub phase: PhaseId,
    pub intensity_level: IntensityLevel,
    pub profile: IntensityProfile,
    pub notes: Vec<CoherenceNote>,
    /// True when the raw profile needed no repair.
    pub coherent: bool,
}

/// Full ordered catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub foundations: Vec<HarmonicFoundation>,
    pub phases: Vec<Phase>,
}

/// One foundation at one level, across every phase in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseComparison {
    pub foundation: FoundationId,
    pub intensity_level: IntensityLevel,
    pub phases: Vec<ProfileReport>,
}

/// Boundary façade over the registry, synthesizer and validator.
///
/// Cheap to clone; every request allocates its own profile and reads the
/// shared registry without locking.
#[derive(Debug, Clone)]
pub struct IntensityEngine {
    registry: Arc<Registry>,
}

impl IntensityEngine {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Derive and validate the profile for caller-supplied identifiers.
    pub fn get_profile(
        &self,
        foundation_id: &str,
        phase_id: &str,
        intensity_level: i64,
    ) -> SoloResult<ProfileReport> {
        let foundation = self.registry.lookup_foundation(foundation_id)?.id;
        let phase = self.registry.lookup_phase(phase_id)?.id;
        let level = IntensityLevel::new(intensity_level)?;
        Ok(self.profile_for(foundation, phase, level))
    }

    /// Typed variant of [`get_profile`](Self::get_profile); cannot fail.
    pub fn profile_for(
        &self,
        foundation: FoundationId,
        phase: PhaseId,
        level: IntensityLevel,
    ) -> ProfileReport {
        let raw = synthesize(
            self.registry.foundation(foundation),
            self.registry.phase(phase),
            level,
        );
        let validated = validate(raw);

        debug!(
            foundation = %foundation,
            phase = %phase,
            level = level.get(),
            repairs = validated.notes.len(),
            "Profile derived"
        );

        ProfileReport {
            foundation,
            phase,
            intensity_level: level,
            coherent: validated.is_coherent(),
            profile: validated.profile,
            notes: validated.notes,
        }
    }

    pub fn list_catalog(&self) -> Catalog {
        Catalog {
            foundations: self.registry.list_foundations().to_vec(),
            phases: self.registry.list_phases().to_vec(),
        }
    }

    pub fn foundation_details(&self, foundation_id: &str) -> SoloResult<HarmonicFoundation> {
        self.registry.lookup_foundation(foundation_id).cloned()
    }

    pub fn phase_details(&self, phase_id: &str) -> SoloResult<Phase> {
        self.registry.lookup_phase(phase_id).cloned()
    }

    pub fn monk_principles(&self) -> Vec<MonkPrinciple> {
        self.registry.monk_principles().to_vec()
    }

    /// Profiles for every phase of one foundation at one level.
    pub fn compare_phases(
        &self,
        foundation_id: &str,
        intensity_level: i64,
    ) -> SoloResult<PhaseComparison> {
        let foundation = self.registry.lookup_foundation(foundation_id)?.id;
        let level = IntensityLevel::new(intensity_level)?;

        Ok(PhaseComparison {
            foundation,
            intensity_level: level,
            phases: PhaseId::ALL
                .into_iter()
                .map(|phase| self.profile_for(foundation, phase, level))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solo_types::{CatalogKind, CoherenceRule, Dimension, SoloError};

    fn engine() -> IntensityEngine {
        IntensityEngine::new(Arc::new(Registry::builtin().unwrap()))
    }

    #[test]
    fn evidence_development_seven() {
        let report = engine().get_profile("Evidence", "development", 7).unwrap();
        let p = report.profile;

        assert_eq!(p.harmonic_complexity, 9);
        assert_eq!(p.note_density, 7);
        assert_eq!(p.rest_space, 6);
        assert!(p.melodic_singularity >= 7);
        assert!(!report.coherent);
        assert_eq!(
            report.notes,
            vec![CoherenceNote {
                rule: CoherenceRule::IntensityRequiresClarity,
                dimension: Dimension::RestSpace,
                required: 6,
                before: 4,
                after: 6,
            }]
        );
    }

    #[test]
    fn epistrophy_development_seven_gets_single_step_offset() {
        let report = engine().get_profile("Epistrophy", "development", 7).unwrap();
        assert_eq!(report.profile.harmonic_complexity, 8);
    }

    #[test]
    fn round_midnight_floor() {
        let report = engine().get_profile("Round Midnight", "statement", 1).unwrap();
        assert!(report.profile.harmonic_complexity >= 5);
        assert!(report.coherent);
    }

    #[test]
    fn statement_leaves_more_rest_than_development() {
        let engine = engine();
        for foundation in FoundationId::ALL {
            let statement = engine.profile_for(
                foundation,
                PhaseId::Statement,
                IntensityLevel::new(8).unwrap(),
            );
            let development = engine.profile_for(
                foundation,
                PhaseId::Development,
                IntensityLevel::new(8).unwrap(),
            );
            assert!(statement.profile.rest_space > development.profile.rest_space);
        }
    }

    #[test]
    fn unknown_foundation() {
        assert_eq!(
            engine().get_profile("Giant Steps", "development", 5),
            Err(SoloError::not_found(CatalogKind::Foundation, "Giant Steps"))
        );
    }

    #[test]
    fn level_out_of_range() {
        assert!(matches!(
            engine().get_profile("Evidence", "development", 11),
            Err(SoloError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine().get_profile("Evidence", "development", 0),
            Err(SoloError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unknown_phase() {
        assert!(matches!(
            engine().get_profile("Evidence", "coda", 5),
            Err(SoloError::NotFound {
                kind: CatalogKind::Phase,
                ..
            })
        ));
    }

    #[test]
    fn catalog_is_complete_and_ordered() {
        let catalog = engine().list_catalog();
        assert_eq!(catalog.foundations.len(), 4);
        assert_eq!(catalog.foundations[0].id, FoundationId::RoundMidnight);
        let phases: Vec<PhaseId> = catalog.phases.iter().map(|p| p.id).collect();
        assert_eq!(phases, PhaseId::ALL.to_vec());
    }

    #[test]
    fn compare_phases_covers_every_phase() {
        let comparison = engine()
            .compare_phases("Round Midnight", i64::from(DEFAULT_COMPARISON_LEVEL))
            .unwrap();
        assert_eq!(comparison.phases.len(), 3);
        let development = &comparison.phases[1];
        let statement = &comparison.phases[0];
        assert_eq!(development.phase, PhaseId::Development);
        assert!(development.profile.harmonic_complexity >= statement.profile.harmonic_complexity);
        assert!(development.profile.note_density > statement.profile.note_density);
    }

    #[test]
    fn details_lookups() {
        let engine = engine();
        assert_eq!(
            engine.foundation_details("ask me now").unwrap().id,
            FoundationId::AskMeNow
        );
        assert_eq!(
            engine.phase_details("RESOLUTION").unwrap().id,
            PhaseId::Resolution
        );
        assert_eq!(engine.monk_principles().len(), 4);
    }

    #[test]
    fn report_serializes_with_snake_case_fields() {
        let report = engine().get_profile("Evidence", "statement", 3).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["foundation"], "Evidence");
        assert_eq!(json["phase"], "statement");
        assert_eq!(json["intensity_level"], 3);
        assert_eq!(json["profile"]["complexity_class"], "bebop_dense");
    }
}
