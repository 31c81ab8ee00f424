//! Prose composition for a validated profile.

use serde::{Deserialize, Serialize};
use solo_types::{HarmonicFoundation, IntensityProfile, Phase, SoloError, SoloResult};

use crate::descriptor::describe;

// ── Options ─────────────────────────────────────────────────────────

/// Per-call composition switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOptions {
    /// Append the phase's Monk visual principle.
    pub monk_emphasis: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            monk_emphasis: true,
        }
    }
}

// ── Composer Trait ──────────────────────────────────────────────────

/// Turns a caller's base description and a validated profile into prose.
pub trait Composer: Send + Sync {
    /// Compose the enhanced description.
    ///
    /// Fails with `InvalidArgument` when the base description is blank.
    fn compose_text(
        &self,
        base_description: &str,
        profile: &IntensityProfile,
        phase: &Phase,
        foundation: &HarmonicFoundation,
        options: ComposeOptions,
    ) -> SoloResult<String>;

    /// Name of this composer implementation.
    fn name(&self) -> &str;
}

// ── Template Composer ───────────────────────────────────────────────

/// Fixed sentence template filled from the catalog records.
#[derive(Debug, Clone)]
pub struct TemplateComposer {
    keyword_count: usize,
}

impl TemplateComposer {
    pub fn new() -> Self {
        Self { keyword_count: 2 }
    }

    /// Use the first `count` phase keywords in the visual treatment.
    pub fn with_keyword_count(count: usize) -> Self {
        Self {
            keyword_count: count.max(1),
        }
    }

    /// Leading phase keywords with catalog placeholders filled in.
    pub fn keywords(&self, phase: &Phase, foundation: &HarmonicFoundation) -> Vec<String> {
        phase
            .keywords
            .iter()
            .take(self.keyword_count)
            .map(|keyword| fill_placeholders(keyword, foundation))
            .collect()
    }
}

impl Default for TemplateComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer for TemplateComposer {
    fn compose_text(
        &self,
        base_description: &str,
        profile: &IntensityProfile,
        phase: &Phase,
        foundation: &HarmonicFoundation,
        options: ComposeOptions,
    ) -> SoloResult<String> {
        let base = base_description.trim();
        if base.is_empty() {
            return Err(SoloError::invalid("base description must not be empty"));
        }

        let keywords = self.keywords(phase, foundation);
        let treatment = if keywords.is_empty() {
            phase.visual_treatment.clone()
        } else {
            keywords.join(", ")
        };

        let mut sentences = vec![
            format!(
                "{}, with the sensory character of a jazz solo in the {} phase: {}.",
                base, phase.id, phase.how_it_feels
            ),
            format!("Visual treatment: {}.", treatment),
            format!("Intensity profile: {}.", describe(profile)),
            format!("The image should feel like it's {}.", phase.sensory_intention),
            format!("Visual analog: {}.", phase.visual_treatment),
        ];

        if options.monk_emphasis {
            if let Some(monk) = &phase.monk {
                sentences.push(format!("Monk principle: {}", monk.visual));
            }
        }

        Ok(sentences.join(" "))
    }

    fn name(&self) -> &str {
        "template"
    }
}

/// Substitute `{foundation}` and `{characteristic}` in a catalog keyword.
fn fill_placeholders(keyword: &str, foundation: &HarmonicFoundation) -> String {
    keyword
        .replace("{foundation}", foundation.name())
        .replace("{characteristic}", &foundation.characteristic)
}
