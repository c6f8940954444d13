use std::collections::HashMap;

use crate::datasource::{DataSource, Xref};

use super::{IdMapper, MappingError};

/// Mapper backed by explicit cross-reference pairs held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMapper {
    name: String,
    links: HashMap<Xref, Vec<Xref>>,
}

impl InMemoryMapper {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: HashMap::new(),
        }
    }

    /// Record that `from` maps to `to`. Results keep insertion order.
    pub fn insert(&mut self, from: Xref, to: Xref) {
        let targets = self.links.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }
}

impl IdMapper for InMemoryMapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn map_id(&self, xref: &Xref, target: &DataSource) -> Result<Vec<Xref>, MappingError> {
        Ok(self
            .links
            .get(xref)
            .map(|targets| {
                targets
                    .iter()
                    .filter(|candidate| &candidate.source == target)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_target_namespace() {
        let from = Xref::new("M1", DataSource::from_code("Ch"));
        let mut mapper = InMemoryMapper::new("memory");
        mapper.insert(from.clone(), Xref::new("C00002", DataSource::from_code("Ck")));
        mapper.insert(from.clone(), Xref::new("15422", DataSource::CHEBI));
        mapper.insert(from.clone(), Xref::new("15422", DataSource::CHEBI));

        let found = mapper.map_id(&from, &DataSource::CHEBI).unwrap();
        assert_eq!(found, vec![Xref::new("15422", DataSource::CHEBI)]);
        assert!(mapper
            .map_id(&Xref::new("other", DataSource::CHEBI), &DataSource::CHEBI)
            .unwrap()
            .is_empty());
    }
}
