//! Per-pathway entity catalog.

use indexmap::IndexMap;
use log::debug;

use crate::datasource::Xref;
use crate::model::{DataNode, MolecularType, Participant, PathwayElement};

/// A data node that can take part in interactions: it has a handle, a
/// native identifier and a namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub handle: String,
    pub xref: Xref,
    pub molecular_type: MolecularType,
    pub name: String,
    pub group_ref: Option<String>,
}

impl Entity {
    fn from_data_node(node: &DataNode) -> Option<Self> {
        let handle = node.graph_id.as_ref()?;
        let source = node.source.as_ref()?;
        if node.xref_id.is_empty() {
            return None;
        }
        Some(Entity {
            handle: handle.clone(),
            xref: Xref::new(node.xref_id.clone(), source.clone()),
            molecular_type: node.molecular_type.clone(),
            name: node.label.clone(),
            group_ref: node.group_ref.clone(),
        })
    }

    pub(crate) fn participant(&self, xref: Xref) -> Participant {
        Participant {
            xref,
            molecular_type: self.molecular_type.clone(),
            name: self.name.clone(),
        }
    }
}

/// Eligible entities of one pathway keyed by handle, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct EntityCatalog {
    entities: IndexMap<String, Entity>,
}

impl EntityCatalog {
    pub fn build(elements: &[PathwayElement]) -> Self {
        let mut entities = IndexMap::new();
        let mut skipped = 0usize;
        for element in elements {
            let PathwayElement::DataNode(node) = element else {
                continue;
            };
            match Entity::from_data_node(node) {
                // A repeated handle keeps its first position.
                Some(entity) => {
                    entities.insert(entity.handle.clone(), entity);
                }
                None => skipped += 1,
            }
        }
        debug!(entities = entities.len(), skipped = skipped; "Built entity catalog");
        Self { entities }
    }

    pub fn get(&self, handle: &str) -> Option<&Entity> {
        self.entities.get(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
