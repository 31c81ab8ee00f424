use std::collections::HashMap;
use std::path::Path;

use solo_types::{
    normalize_identifier, CatalogKind, FoundationId, HarmonicFoundation, MonkPrinciple, Phase,
    PhaseId, SoloError, SoloResult,
};
use tracing::info;

use crate::catalog::{CatalogDocument, RegistryError, BUILTIN_CATALOG};

/// Read-only catalog of foundations, phases and Monk principles.
///
/// Built once at startup from a validated [`CatalogDocument`] and shared
/// behind an `Arc` afterwards. There is no mutating API.
#[derive(Debug, Clone)]
pub struct Registry {
    foundations: Vec<HarmonicFoundation>,
    foundation_index: HashMap<FoundationId, usize>,
    phases: Vec<Phase>,
    principles: Vec<MonkPrinciple>,
}

impl Registry {
    /// Build from a document, validating it first.
    pub fn from_document(document: CatalogDocument) -> Result<Self, RegistryError> {
        document.validate()?;

        let CatalogDocument {
            foundations,
            mut phases,
            principles,
        } = document;

        let foundation_index = foundations
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id, i))
            .collect();
        phases.sort_by_key(|p| p.ordinal);

        Ok(Self {
            foundations,
            foundation_index,
            phases,
            principles,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::from_document(CatalogDocument::from_json(json)?)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load the catalog at `path`, or the built-in one when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, RegistryError> {
        let registry = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin()?,
        };

        info!(
            source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "builtin".into()),
            foundations = registry.foundations.len(),
            phases = registry.phases.len(),
            principles = registry.principles.len(),
            "Reference registry loaded"
        );

        Ok(registry)
    }

    /// Look up a foundation by caller-supplied name.
    pub fn lookup_foundation(&self, id: &str) -> SoloResult<&HarmonicFoundation> {
        FoundationId::parse(id).map(|id| self.foundation(id))
    }

    /// Foundation for an already-resolved identifier. Every identifier is
    /// present once the catalog has validated.
    pub fn foundation(&self, id: FoundationId) -> &HarmonicFoundation {
        &self.foundations[self.foundation_index[&id]]
    }

    pub fn lookup_phase(&self, id: &str) -> SoloResult<&Phase> {
        PhaseId::parse(id).map(|id| self.phase(id))
    }

    pub fn phase(&self, id: PhaseId) -> &Phase {
        // Sorted by ordinal and complete, so the ordinal is the index.
        &self.phases[usize::from(id.ordinal())]
    }

    /// Foundations in catalog declaration order.
    pub fn list_foundations(&self) -> &[HarmonicFoundation] {
        &self.foundations
    }

    /// Phases in their fixed order.
    pub fn list_phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn monk_principles(&self) -> &[MonkPrinciple] {
        &self.principles
    }

    /// Look up a principle by key; spaces and underscores are interchangeable.
    pub fn monk_principle(&self, key: &str) -> SoloResult<&MonkPrinciple> {
        let normalized = normalize_identifier(key)?.replace(' ', "_");
        self.principles
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| SoloError::not_found(CatalogKind::Principle, key.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solo_types::ComplexityClass;

    fn registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn foundations_keep_declaration_order() {
        let names: Vec<&str> = registry()
            .list_foundations()
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(
            names,
            vec!["Round Midnight", "Evidence", "Epistrophy", "Ask Me Now"]
        );
    }

    #[test]
    fn foundation_classes() {
        let registry = registry();
        let class = |name: &str| registry.lookup_foundation(name).unwrap().complexity;
        assert_eq!(class("Round Midnight"), ComplexityClass::AngularChromatic);
        assert_eq!(class("Evidence"), ComplexityClass::BebopDense);
        assert_eq!(class("Epistrophy"), ComplexityClass::ModalRepetition);
        assert_eq!(class("Ask Me Now"), ComplexityClass::LyricalSimple);
    }

    #[test]
    fn lookup_normalizes_identifier() {
        let registry = registry();
        let foundation = registry.lookup_foundation("  round   MIDNIGHT").unwrap();
        assert_eq!(foundation.id, FoundationId::RoundMidnight);
        assert!(foundation.monk_essence);
    }

    #[test]
    fn unknown_foundation_is_not_found() {
        assert!(matches!(
            registry().lookup_foundation("Giant Steps"),
            Err(SoloError::NotFound {
                kind: CatalogKind::Foundation,
                ..
            })
        ));
    }

    #[test]
    fn malformed_identifier_is_invalid() {
        assert!(matches!(
            registry().lookup_phase(""),
            Err(SoloError::InvalidArgument(_))
        ));
    }

    #[test]
    fn phases_are_in_fixed_order() {
        let registry = registry();
        let ids: Vec<PhaseId> = registry.list_phases().iter().map(|p| p.id).collect();
        assert_eq!(ids, PhaseId::ALL.to_vec());
        assert_eq!(registry.phase(PhaseId::Resolution).ordinal, 2);
    }

    #[test]
    fn phase_lookup_rejects_unknown() {
        assert!(matches!(
            registry().lookup_phase("bridge"),
            Err(SoloError::NotFound {
                kind: CatalogKind::Phase,
                ..
            })
        ));
    }

    #[test]
    fn phases_are_sorted_even_when_declared_out_of_order() {
        let mut doc = CatalogDocument::from_json(BUILTIN_CATALOG).unwrap();
        doc.phases.reverse();
        let registry = Registry::from_document(doc).unwrap();
        assert_eq!(registry.phase(PhaseId::Statement).id, PhaseId::Statement);
    }

    #[test]
    fn monk_principle_lookup() {
        let registry = registry();
        assert_eq!(registry.monk_principles().len(), 4);
        let principle = registry.monk_principle("Silence as Structure").unwrap();
        assert_eq!(principle.key, "silence_as_structure");
        assert!(registry.monk_principle("swing_as_law").is_err());
    }

    #[test]
    fn load_from_path() {
        let path = std::env::temp_dir().join(format!("solo-catalog-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, BUILTIN_CATALOG).unwrap();
        let registry = Registry::load(Some(&path)).unwrap();
        assert_eq!(registry.list_foundations().len(), 4);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = Path::new("/nonexistent/solo/catalog.json");
        assert!(matches!(
            Registry::load(Some(path)),
            Err(RegistryError::Io { .. })
        ));
    }
}
