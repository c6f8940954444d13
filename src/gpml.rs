//! GPML reader.
//!
//! Only the parts of the format the converter consumes are read: the
//! pathway name, data nodes with their xref and group reference, groups and
//! their style, and the endpoints plus end arrow head of drawn lines.
//! Elements are matched by local name, so every GPML namespace revision
//! that keeps these attributes is accepted.

use std::fs;
use std::path::Path;

use log::debug;
use roxmltree::{Document, Node};

use crate::datasource::DataSource;
use crate::error::{Error, Result};
use crate::model::{
    Connection, DataNode, Group, GroupStyle, MolecularType, Pathway, PathwayElement,
};

/// Arrow head PathVisio reports for a line that declares none.
const DEFAULT_EDGE_KIND: &str = "Line";

pub fn read_pathway(path: &Path) -> Result<Pathway> {
    let xml = fs::read_to_string(path)?;
    let pathway = parse_pathway(&xml)?;
    debug!(
        path = path.display().to_string(),
        elements = pathway.elements.len();
        "Read pathway"
    );
    Ok(pathway)
}

pub fn parse_pathway(xml: &str) -> Result<Pathway> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if !root.has_tag_name("Pathway") {
        return Err(Error::NotPathway(root.tag_name().name().to_string()));
    }

    let mut elements = Vec::new();
    for node in root.children().filter(Node::is_element) {
        match node.tag_name().name() {
            "DataNode" => elements.push(PathwayElement::DataNode(parse_data_node(&node))),
            "Group" => elements.push(PathwayElement::Group(parse_group(&node))),
            "Interaction" | "GraphicalLine" => {
                elements.push(PathwayElement::Connection(parse_connection(&node)))
            }
            _ => {}
        }
    }

    Ok(Pathway {
        name: root.attribute("Name").unwrap_or_default().to_string(),
        organism: non_empty(root.attribute("Organism")),
        elements,
    })
}

fn parse_data_node(node: &Node) -> DataNode {
    let xref = node.children().find(|child| child.has_tag_name("Xref"));
    let xref_id = xref
        .and_then(|xref| xref.attribute("ID"))
        .unwrap_or_default()
        .trim()
        .to_string();
    let source = xref
        .and_then(|xref| xref.attribute("Database"))
        .and_then(DataSource::from_full_name);

    DataNode {
        graph_id: non_empty(node.attribute("GraphId")),
        label: node
            .attribute("TextLabel")
            .unwrap_or_default()
            .replace('\r', ""),
        molecular_type: MolecularType::parse(node.attribute("Type").unwrap_or_default()),
        xref_id,
        source,
        group_ref: non_empty(node.attribute("GroupRef")),
    }
}

fn parse_group(node: &Node) -> Group {
    Group {
        group_id: non_empty(node.attribute("GroupId")),
        style: GroupStyle::parse(node.attribute("Style").unwrap_or_default()),
    }
}

fn parse_connection(node: &Node) -> Connection {
    let points: Vec<Node> = node
        .children()
        .filter(|child| child.has_tag_name("Graphics"))
        .flat_map(|graphics| graphics.children())
        .filter(|child| child.has_tag_name("Point"))
        .collect();

    // A line with a single point has the same element at both ends.
    let first = points.first();
    let last = points.last();

    Connection {
        graph_id: non_empty(node.attribute("GraphId")),
        start: first.and_then(|point| non_empty(point.attribute("GraphRef"))),
        end: last.and_then(|point| non_empty(point.attribute("GraphRef"))),
        edge_kind: last
            .and_then(|point| non_empty(point.attribute("ArrowHead")))
            .unwrap_or_else(|| DEFAULT_EDGE_KIND.to_string()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
