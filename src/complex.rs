use log::debug;

use crate::catalog::{Entity, EntityCatalog};
use crate::model::{GroupStyle, PathwayElement};

/// A group styled as a molecular complex, with its eligible members in
/// catalog order.
#[derive(Clone, Debug)]
pub struct Complex<'a> {
    pub group_id: String,
    pub members: Vec<&'a Entity>,
}

pub fn resolve_complexes<'a>(
    elements: &[PathwayElement],
    catalog: &'a EntityCatalog,
) -> Vec<Complex<'a>> {
    let group_ids = elements.iter().filter_map(|element| match element {
        PathwayElement::Group(group) if group.style == GroupStyle::Complex => {
            group.group_id.as_deref()
        }
        _ => None,
    });

    group_ids
        .map(|group_id| {
            let members: Vec<&Entity> = catalog
                .iter()
                .filter(|entity| {
                    entity
                        .group_ref
                        .as_deref()
                        .is_some_and(|group_ref| group_ref.eq_ignore_ascii_case(group_id))
                })
                .collect();
            debug!(group_id = group_id, members = members.len(); "Resolved complex");
            Complex {
                group_id: group_id.to_string(),
                members,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::DataSource;
    use crate::model::{DataNode, Group, MolecularType};

    fn member(handle: &str, id: &str, group: Option<&str>) -> PathwayElement {
        PathwayElement::DataNode(DataNode {
            graph_id: Some(handle.to_string()),
            label: handle.to_string(),
            molecular_type: MolecularType::Protein,
            xref_id: id.to_string(),
            source: Some(DataSource::UNIPROT_TREMBL),
            group_ref: group.map(str::to_string),
        })
    }

    fn group(id: Option<&str>, style: GroupStyle) -> PathwayElement {
        PathwayElement::Group(Group {
            group_id: id.map(str::to_string),
            style,
        })
    }

    fn handles(complex: &Complex) -> Vec<String> {
        complex.members.iter().map(|e| e.handle.clone()).collect()
    }

    #[test]
    fn members_follow_catalog_order_and_match_case_insensitively() {
        let elements = vec![
            group(Some("G1"), GroupStyle::Complex),
            member("c", "P3", Some("g1")),
            member("a", "P1", Some("G1")),
            member("b", "P2", Some("other")),
        ];
        let catalog = EntityCatalog::build(&elements);
        let complexes = resolve_complexes(&elements, &catalog);
        assert_eq!(complexes.len(), 1);
        assert_eq!(complexes[0].group_id, "G1");
        assert_eq!(handles(&complexes[0]), vec!["c", "a"]);
    }

    #[test]
    fn only_complex_groups_with_an_id_count() {
        let elements = vec![
            group(Some("plain"), GroupStyle::Group),
            group(None, GroupStyle::Complex),
            group(Some("x"), GroupStyle::Complex),
            group(Some("y"), GroupStyle::Complex),
            member("a", "P1", Some("y")),
        ];
        let catalog = EntityCatalog::build(&elements);
        let complexes = resolve_complexes(&elements, &catalog);
        let ids: Vec<_> = complexes.iter().map(|c| c.group_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
        assert!(complexes[0].members.is_empty());
        assert_eq!(handles(&complexes[1]), vec!["a"]);
    }

    #[test]
    fn ineligible_members_are_left_out() {
        let elements = vec![
            group(Some("g"), GroupStyle::Complex),
            member("a", "", Some("g")),
            member("b", "P2", Some("g")),
        ];
        let catalog = EntityCatalog::build(&elements);
        let complexes = resolve_complexes(&elements, &catalog);
        assert_eq!(handles(&complexes[0]), vec!["b"]);
    }
}
