use std::sync::Arc;

use serde::{Deserialize, Serialize};
use solo_engine::{IntensityEngine, ProfileReport};
use solo_types::{FoundationId, PhaseId, SoloError, SoloResult};
use tracing::debug;

use crate::composer::{ComposeOptions, Composer, TemplateComposer};
use crate::descriptor::describe;

pub const DEFAULT_FOUNDATION: &str = "Round Midnight";
pub const DEFAULT_PHASE: &str = "development";
pub const DEFAULT_INTENSITY_LEVEL: i64 = 5;

/// Fixed reminder that a single image carries the whole arc.
pub const TEMPORAL_NOTE: &str = "This visual should feel like it unfolds through time: \
     constraint establishing, complexity emerging, then clarity resolving";

fn default_foundation() -> String {
    DEFAULT_FOUNDATION.to_string()
}

fn default_phase() -> String {
    DEFAULT_PHASE.to_string()
}

fn default_intensity_level() -> i64 {
    DEFAULT_INTENSITY_LEVEL
}

/// Caller request to enhance a base prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementRequest {
    pub base_prompt: String,
    #[serde(default = "default_foundation")]
    pub harmonic_foundation: String,
    #[serde(default = "default_phase")]
    pub solo_phase: String,
    #[serde(default = "default_intensity_level")]
    pub intensity_level: i64,
    /// Falls back to the enhancer's configured default when absent.
    #[serde(default)]
    pub monk_emphasis: Option<bool>,
}

impl EnhancementRequest {
    pub fn new(base_prompt: impl Into<String>) -> Self {
        Self {
            base_prompt: base_prompt.into(),
            harmonic_foundation: default_foundation(),
            solo_phase: default_phase(),
            intensity_level: DEFAULT_INTENSITY_LEVEL,
            monk_emphasis: None,
        }
    }
}

/// Enhanced prompt with everything that shaped it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enhancement {
    pub original_prompt: String,
    pub enhanced_prompt: String,
    pub harmonic_foundation: FoundationId,
    pub solo_phase: PhaseId,
    pub intensity_profile: ProfileReport,
    pub intensity_descriptor: String,
    pub sensory_intention: String,
    pub visual_analog: String,
    pub how_it_feels: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monk_principle: Option<String>,
    pub coherence_note: String,
    pub temporal_note: String,
}

/// Runs the engine and a [`Composer`] for one request.
#[derive(Clone)]
pub struct Enhancer {
    engine: IntensityEngine,
    composer: Arc<dyn Composer>,
    defaults: ComposeOptions,
}

impl Enhancer {
    /// Enhancer using the [`TemplateComposer`].
    pub fn new(engine: IntensityEngine) -> Self {
        Self::with_composer(engine, Arc::new(TemplateComposer::new()))
    }

    pub fn with_composer(engine: IntensityEngine, composer: Arc<dyn Composer>) -> Self {
        Self {
            engine,
            composer,
            defaults: ComposeOptions::default(),
        }
    }

    /// Options used when a request leaves them unset.
    pub fn with_defaults(mut self, defaults: ComposeOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn engine(&self) -> &IntensityEngine {
        &self.engine
    }

    pub fn defaults(&self) -> ComposeOptions {
        self.defaults
    }

    pub fn enhance(&self, request: &EnhancementRequest) -> SoloResult<Enhancement> {
        let original = request.base_prompt.trim();
        if original.is_empty() {
            return Err(SoloError::invalid("base_prompt must not be empty"));
        }

        let report = self.engine.get_profile(
            &request.harmonic_foundation,
            &request.solo_phase,
            request.intensity_level,
        )?;

        let registry = self.engine.registry();
        let foundation = registry.foundation(report.foundation);
        let phase = registry.phase(report.phase);

        let options = ComposeOptions {
            monk_emphasis: request
                .monk_emphasis
                .unwrap_or(self.defaults.monk_emphasis),
        };

        let enhanced_prompt =
            self.composer
                .compose_text(original, &report.profile, phase, foundation, options)?;

        debug!(
            composer = self.composer.name(),
            foundation = %report.foundation,
            phase = %report.phase,
            level = report.intensity_level.get(),
            monk_emphasis = options.monk_emphasis,
            "Prompt enhanced"
        );

        Ok(Enhancement {
            original_prompt: original.to_string(),
            enhanced_prompt,
            harmonic_foundation: report.foundation,
            solo_phase: report.phase,
            intensity_descriptor: describe(&report.profile).to_string(),
            sensory_intention: phase.sensory_intention.clone(),
            visual_analog: phase.visual_treatment.clone(),
            how_it_feels: phase.how_it_feels.clone(),
            monk_principle: if options.monk_emphasis {
                phase.monk.as_ref().map(|m| m.visual.clone())
            } else {
                None
            },
            coherence_note: format!(
                "This enhancement maintains the {} phase character: {}",
                phase.id, phase.epistemic_role
            ),
            temporal_note: TEMPORAL_NOTE.to_string(),
            intensity_profile: report,
        })
    }
}

impl std::fmt::Debug for Enhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enhancer")
            .field("composer", &self.composer.name())
            .field("defaults", &self.defaults)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solo_registry::Registry;
    use solo_types::CatalogKind;

    fn enhancer() -> Enhancer {
        Enhancer::new(IntensityEngine::new(Arc::new(Registry::builtin().unwrap())))
    }

    #[test]
    fn enhances_with_defaults() {
        let enhancement = enhancer()
            .enhance(&EnhancementRequest::new("a lighthouse in fog"))
            .unwrap();

        assert_eq!(enhancement.original_prompt, "a lighthouse in fog");
        assert_eq!(enhancement.harmonic_foundation, FoundationId::RoundMidnight);
        assert_eq!(enhancement.solo_phase, PhaseId::Development);
        assert_eq!(enhancement.intensity_profile.intensity_level.get(), 5);
        assert!(enhancement
            .enhanced_prompt
            .starts_with("a lighthouse in fog, with the sensory character"));
        assert!(enhancement.monk_principle.is_some());
        assert_eq!(enhancement.temporal_note, TEMPORAL_NOTE);
        assert!(enhancement
            .coherence_note
            .starts_with("This enhancement maintains the development phase character: "));
    }

    #[test]
    fn evidence_development_seven_reads_dense() {
        let mut request = EnhancementRequest::new("a crowded market");
        request.harmonic_foundation = "evidence".into();
        request.intensity_level = 7;

        let enhancement = enhancer().enhance(&request).unwrap();
        // mean(7, 7, 9) rounds to 8
        assert_eq!(enhancement.intensity_descriptor, "dense, intricate");
        assert!(enhancement
            .enhanced_prompt
            .contains("Intensity profile: dense, intricate."));
        assert_eq!(enhancement.intensity_profile.profile.rest_space, 6);
        assert_eq!(enhancement.intensity_profile.notes.len(), 1);
    }

    #[test]
    fn request_overrides_monk_default() {
        let enhancer = enhancer().with_defaults(ComposeOptions {
            monk_emphasis: false,
        });

        let plain = enhancer
            .enhance(&EnhancementRequest::new("a quiet room"))
            .unwrap();
        assert!(plain.monk_principle.is_none());
        assert!(!plain.enhanced_prompt.contains("Monk principle"));

        let mut request = EnhancementRequest::new("a quiet room");
        request.monk_emphasis = Some(true);
        let emphasized = enhancer.enhance(&request).unwrap();
        assert!(emphasized.enhanced_prompt.contains("Monk principle: "));
    }

    #[test]
    fn errors_surface_unchanged() {
        let enhancer = enhancer();

        assert!(matches!(
            enhancer.enhance(&EnhancementRequest::new("   ")),
            Err(SoloError::InvalidArgument(_))
        ));

        let mut request = EnhancementRequest::new("a train");
        request.harmonic_foundation = "Giant Steps".into();
        assert_eq!(
            enhancer.enhance(&request),
            Err(SoloError::not_found(CatalogKind::Foundation, "Giant Steps"))
        );

        let mut request = EnhancementRequest::new("a train");
        request.intensity_level = 11;
        assert!(matches!(
            enhancer.enhance(&request),
            Err(SoloError::InvalidArgument(_))
        ));
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: EnhancementRequest =
            serde_json::from_str(r#"{"base_prompt": "a bridge"}"#).unwrap();
        assert_eq!(request, EnhancementRequest::new("a bridge"));
    }

    #[test]
    fn enhancement_serializes_flat_names() {
        let enhancement = enhancer()
            .enhance(&EnhancementRequest::new("a bridge"))
            .unwrap();
        let json = serde_json::to_value(&enhancement).unwrap();
        assert_eq!(json["harmonic_foundation"], "Round Midnight");
        assert_eq!(json["solo_phase"], "development");
        assert!(json["intensity_profile"]["profile"]["rest_space"].is_u64());
    }
}
