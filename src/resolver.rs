//! Preferred-identifier resolution.
//!
//! Every identifier is normalized into the namespace its molecular type
//! prefers (see [`MolecularType::preferred_source`]) before it is placed in
//! an interaction record.

use std::cell::RefCell;
use std::collections::HashMap;

use log::{debug, warn};

use crate::datasource::{DataSource, Xref};
use crate::mapping::{IdMapper, MappingError};
use crate::model::MolecularType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Already in the preferred namespace; the mapper was not consulted.
    Preferred(Xref),
    /// First cross-reference the mapper returned in the preferred namespace.
    Mapped(Xref),
    /// The mapper knows no cross-reference; the original reference stands.
    Unmapped(Xref),
}

impl Resolution {
    pub fn xref(&self) -> &Xref {
        match self {
            Resolution::Preferred(xref) | Resolution::Mapped(xref) | Resolution::Unmapped(xref) => {
                xref
            }
        }
    }

    pub fn into_xref(self) -> Xref {
        match self {
            Resolution::Preferred(xref) | Resolution::Mapped(xref) | Resolution::Unmapped(xref) => {
                xref
            }
        }
    }
}

/// Resolves references against a loaded mapper, memoizing each result.
///
/// The mapper is only read, so repeated calls with the same input always
/// return the same reference.
pub struct IdResolver<'m> {
    mapper: &'m dyn IdMapper,
    cache: RefCell<HashMap<(DataSource, Xref), Xref>>,
}

impl<'m> IdResolver<'m> {
    pub fn new(mapper: &'m dyn IdMapper) -> Self {
        Self {
            mapper,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve without any fallback: mapping failures are returned.
    pub fn try_resolve(
        &self,
        molecular_type: &MolecularType,
        id: &str,
        source: Option<&DataSource>,
    ) -> Result<Resolution, MappingError> {
        let original = Xref::new(id, source.cloned().unwrap_or(DataSource::UNSPECIFIED));
        let preferred = molecular_type.preferred_source();
        if original.source == preferred {
            return Ok(Resolution::Preferred(original));
        }

        let mut found = self.mapper.map_id(&original, &preferred)?;
        if found.is_empty() {
            Ok(Resolution::Unmapped(original))
        } else {
            Ok(Resolution::Mapped(found.swap_remove(0)))
        }
    }

    /// Resolve to the preferred reference, falling back to the original
    /// reference when the mapper fails or knows nothing.
    pub fn resolve(
        &self,
        molecular_type: &MolecularType,
        id: &str,
        source: Option<&DataSource>,
    ) -> Xref {
        let key = (
            molecular_type.preferred_source(),
            Xref::new(id, source.cloned().unwrap_or(DataSource::UNSPECIFIED)),
        );
        if let Some(hit) = self.cache.borrow().get(&key) {
            return hit.clone();
        }

        let resolved = match self.try_resolve(molecular_type, id, source) {
            Ok(resolution) => {
                if let Resolution::Unmapped(xref) = &resolution {
                    debug!(xref = xref.to_string(), target = key.0.code(); "No preferred identifier");
                }
                resolution.into_xref()
            }
            Err(err) => {
                warn!(xref = key.1.to_string(), error = err.to_string(); "Identifier mapping failed, keeping original");
                key.1.clone()
            }
        };
        self.cache.borrow_mut().insert(key, resolved.clone());
        resolved
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::mapping::InMemoryMapper;

    /// Counts queries and delegates to an in-memory mapper.
    struct Counting {
        inner: InMemoryMapper,
        calls: Cell<usize>,
    }

    impl IdMapper for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn map_id(&self, xref: &Xref, target: &DataSource) -> Result<Vec<Xref>, MappingError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.map_id(xref, target)
        }
    }

    struct Failing;

    impl IdMapper for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn map_id(&self, _: &Xref, _: &DataSource) -> Result<Vec<Xref>, MappingError> {
            Err(MappingError::Unavailable("failing".into()))
        }
    }

    fn hmdb() -> DataSource {
        DataSource::from_code("Ch")
    }

    fn counting() -> Counting {
        let mut inner = InMemoryMapper::new("memory");
        inner.insert(Xref::new("HMDB0000538", hmdb()), Xref::new("15422", DataSource::CHEBI));
        inner.insert(Xref::new("HMDB0000538", hmdb()), Xref::new("30616", DataSource::CHEBI));
        inner.insert(
            Xref::new("7157", DataSource::from_code("L")),
            Xref::new("ENSG00000141510", DataSource::ENSEMBL),
        );
        Counting {
            inner,
            calls: Cell::new(0),
        }
    }

    #[test]
    fn metabolite_maps_to_first_chebi_result() {
        let mapper = counting();
        let resolver = IdResolver::new(&mapper);
        let resolution = resolver
            .try_resolve(&MolecularType::Metabolite, "HMDB0000538", Some(&hmdb()))
            .unwrap();
        assert_eq!(resolution, Resolution::Mapped(Xref::new("15422", DataSource::CHEBI)));
    }

    #[test]
    fn preferred_namespace_skips_the_mapper() {
        let mapper = counting();
        let resolver = IdResolver::new(&mapper);
        let xref = resolver.resolve(&MolecularType::Protein, "P04637", Some(&DataSource::UNIPROT_TREMBL));
        assert_eq!(xref, Xref::new("P04637", DataSource::UNIPROT_TREMBL));
        assert_eq!(mapper.calls.get(), 0);
    }

    #[test]
    fn gene_products_and_unknown_types_prefer_ensembl() {
        let mapper = counting();
        let resolver = IdResolver::new(&mapper);
        let entrez = DataSource::from_code("L");
        for molecular_type in [MolecularType::GeneProduct, MolecularType::parse("Rna")] {
            assert_eq!(
                resolver.resolve(&molecular_type, "7157", Some(&entrez)),
                Xref::new("ENSG00000141510", DataSource::ENSEMBL)
            );
        }
    }

    #[test]
    fn empty_result_keeps_original_reference() {
        let mapper = counting();
        let resolver = IdResolver::new(&mapper);
        let entrez = DataSource::from_code("L");
        assert_eq!(
            resolver.try_resolve(&MolecularType::Protein, "7157", Some(&entrez)).unwrap(),
            Resolution::Unmapped(Xref::new("7157", entrez.clone()))
        );
        assert_eq!(
            resolver.resolve(&MolecularType::Protein, "7157", Some(&entrez)),
            Xref::new("7157", entrez)
        );
    }

    #[test]
    fn mapping_failure_degrades_to_original_reference() {
        let resolver = IdResolver::new(&Failing);
        let source = hmdb();
        assert!(resolver
            .try_resolve(&MolecularType::Metabolite, "HMDB1", Some(&source))
            .is_err());
        assert_eq!(
            resolver.resolve(&MolecularType::Metabolite, "HMDB1", Some(&source)),
            Xref::new("HMDB1", source)
        );
    }

    #[test]
    fn missing_namespace_uses_placeholder() {
        let mapper = counting();
        let resolver = IdResolver::new(&mapper);
        assert_eq!(
            resolver.resolve(&MolecularType::GeneProduct, "X1", None),
            Xref::new("X1", DataSource::UNSPECIFIED)
        );
    }

    #[test]
    fn repeated_resolution_is_stable_and_memoized() {
        let mapper = counting();
        let resolver = IdResolver::new(&mapper);
        let first = resolver.resolve(&MolecularType::Metabolite, "HMDB0000538", Some(&hmdb()));
        let second = resolver.resolve(&MolecularType::Metabolite, "HMDB0000538", Some(&hmdb()));
        assert_eq!(first, second);
        assert_eq!(mapper.calls.get(), 1);
    }
}
