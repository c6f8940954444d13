//! Pathway elements as read from a diagram, and the interaction records the
//! converter produces from them.

use std::fmt;

use serde::Deserialize;

use crate::datasource::{DataSource, Xref};

/// Default molecular type GPML assigns to a data node without `@Type`.
const UNKNOWN_TYPE_LABEL: &str = "Unknown";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MolecularType {
    Metabolite,
    Protein,
    GeneProduct,
    /// Any other data node type; the diagram's label is kept for output.
    Other(String),
}

impl MolecularType {
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("Metabolite") {
            MolecularType::Metabolite
        } else if label.eq_ignore_ascii_case("Protein") {
            MolecularType::Protein
        } else if label.eq_ignore_ascii_case("GeneProduct") {
            MolecularType::GeneProduct
        } else if label.is_empty() {
            MolecularType::Other(UNKNOWN_TYPE_LABEL.to_string())
        } else {
            MolecularType::Other(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MolecularType::Metabolite => "Metabolite",
            MolecularType::Protein => "Protein",
            MolecularType::GeneProduct => "GeneProduct",
            MolecularType::Other(label) => label,
        }
    }

    /// Namespace identifiers of this type are normalized into.
    pub fn preferred_source(&self) -> DataSource {
        match self {
            MolecularType::Metabolite => DataSource::CHEBI,
            MolecularType::Protein => DataSource::UNIPROT_TREMBL,
            MolecularType::GeneProduct | MolecularType::Other(_) => DataSource::ENSEMBL,
        }
    }
}

impl fmt::Display for MolecularType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupStyle {
    None,
    Group,
    Complex,
    Pathway,
}

impl GroupStyle {
    pub fn parse(style: &str) -> Self {
        match style.trim().to_ascii_lowercase().as_str() {
            "complex" => GroupStyle::Complex,
            "group" => GroupStyle::Group,
            "pathway" => GroupStyle::Pathway,
            _ => GroupStyle::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataNode {
    pub graph_id: Option<String>,
    pub label: String,
    pub molecular_type: MolecularType,
    /// `Xref/@ID`; empty when the node is not annotated.
    pub xref_id: String,
    pub source: Option<DataSource>,
    pub group_ref: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub group_id: Option<String>,
    pub style: GroupStyle,
}

/// A drawn line between two diagram elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pub graph_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Arrow head at the end of the line, e.g. `Arrow`, `TBar`, `mim-binding`.
    pub edge_kind: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathwayElement {
    DataNode(DataNode),
    Group(Group),
    Connection(Connection),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pathway {
    pub name: String,
    pub organism: Option<String>,
    pub elements: Vec<PathwayElement>,
}

impl Pathway {
    pub fn data_nodes(&self) -> impl Iterator<Item = &DataNode> {
        self.elements.iter().filter_map(|element| match element {
            PathwayElement::DataNode(node) => Some(node),
            _ => None,
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.elements.iter().filter_map(|element| match element {
            PathwayElement::Group(group) => Some(group),
            _ => None,
        })
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.elements.iter().filter_map(|element| match element {
            PathwayElement::Connection(connection) => Some(connection),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Label of a drawn connection, passed through unchanged.
    Drawn(String),
    /// Co-membership in a molecular complex.
    CovalentBinding,
}

impl InteractionKind {
    pub fn label(&self) -> &str {
        match self {
            InteractionKind::Drawn(label) => label,
            InteractionKind::CovalentBinding => "covalent binding",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Participant {
    pub xref: Xref,
    pub molecular_type: MolecularType,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionRecord {
    pub source: Participant,
    pub target: Participant,
    pub kind: InteractionKind,
    pub pathway: String,
}

/// How members of a molecular complex are paired into records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComplexPairing {
    /// Every unordered pair of distinct members exactly once.
    #[default]
    Distinct,
    /// Historical pairing: each member against members `n-1` down to `2`,
    /// self-pairs and both orderings included.
    Literal,
}
