//! PSI-MI XML 2.5.4 output.
//!
//! Records are buffered and the whole `entrySet` is written on
//! [`Report::finish`], since the interactor list has to precede the
//! interactions that reference it. Experiment, organism and roles are
//! placeholders taken from [`PsimiMetadata`], not derived from pathways.

use std::io::Write;

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Deserialize;

use crate::datasource::Xref;
use crate::error::Result;
use crate::model::{InteractionKind, InteractionRecord, MolecularType, Participant};

use super::{RecordSink, Report};

const NAMESPACE: &str = "net:sf:psidev:mi";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "net:sf:psidev:mi http://psidev.sourceforge.net/mi/rel25/src/MIF254.xsd";
const EXPERIMENT_ID: usize = 1;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CvTerm {
    pub id: String,
    pub label: String,
}

impl CvTerm {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Organism {
    pub tax_id: u32,
    pub short_label: String,
    pub full_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PsimiMetadata {
    pub source: String,
    pub experiment_label: String,
    pub pubmed_id: String,
    pub organism: Organism,
    pub detection_method: CvTerm,
    pub participant_identification: CvTerm,
}

impl Default for PsimiMetadata {
    fn default() -> Self {
        Self {
            source: "WikiPathways".to_string(),
            experiment_label: "experiment1".to_string(),
            pubmed_id: "1234567".to_string(),
            organism: Organism {
                tax_id: 9606,
                short_label: "human".to_string(),
                full_name: "Homo sapiens".to_string(),
            },
            detection_method: CvTerm::new("MI:0363", "inferred by author"),
            participant_identification: CvTerm::new("MI:0363", "inferred by author"),
        }
    }
}

fn interactor_type(molecular_type: &MolecularType) -> CvTerm {
    match molecular_type {
        MolecularType::Metabolite => CvTerm::new("MI:0328", "small molecule"),
        MolecularType::Protein => CvTerm::new("MI:0326", "protein"),
        MolecularType::GeneProduct => CvTerm::new("MI:0250", "gene"),
        MolecularType::Other(_) => CvTerm::new("MI:0329", "unknown participant"),
    }
}

fn interaction_type(kind: &InteractionKind) -> CvTerm {
    match kind {
        InteractionKind::Drawn(_) => CvTerm::new("MI:0407", "direct interaction"),
        InteractionKind::CovalentBinding => CvTerm::new("MI:0195", "covalent binding"),
    }
}

type InteractorKey<'a> = (&'a Xref, &'a MolecularType);

fn interactor_key(participant: &Participant) -> InteractorKey<'_> {
    (&participant.xref, &participant.molecular_type)
}

fn unspecified_role() -> CvTerm {
    CvTerm::new("MI:0499", "unspecified role")
}

pub struct PsimiReport<W: Write> {
    out: W,
    metadata: PsimiMetadata,
    records: Vec<InteractionRecord>,
}

impl<W: Write> PsimiReport<W> {
    pub fn new(out: W, metadata: PsimiMetadata) -> Self {
        Self {
            out,
            metadata,
            records: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_document(&mut self) -> Result<()> {
        // Interactors are shared between interactions and keyed by reference
        // and molecular type; ids follow the experiment id and interactions
        // continue the sequence after them.
        let mut interactors: IndexMap<InteractorKey, (usize, &Participant)> = IndexMap::new();
        for record in &self.records {
            for participant in [&record.source, &record.target] {
                let next_id = EXPERIMENT_ID + 1 + interactors.len();
                interactors
                    .entry(interactor_key(participant))
                    .or_insert((next_id, participant));
            }
        }

        let mut w = Writer::new_with_indent(&mut self.out, b' ', 2);
        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        start(
            &mut w,
            "entrySet",
            &[
                ("xmlns", NAMESPACE),
                ("xmlns:xsi", XSI_NAMESPACE),
                ("xsi:schemaLocation", SCHEMA_LOCATION),
                ("level", "2"),
                ("version", "5"),
                ("minorVersion", "4"),
            ],
        )?;
        start(&mut w, "entry", &[])?;

        start(&mut w, "source", &[])?;
        names(&mut w, &self.metadata.source, None)?;
        end(&mut w, "source")?;

        write_experiment(&mut w, &self.metadata)?;

        start(&mut w, "interactorList", &[])?;
        for (id, participant) in interactors.values() {
            write_interactor(&mut w, *id, participant, &self.metadata.organism)?;
        }
        end(&mut w, "interactorList")?;

        start(&mut w, "interactionList", &[])?;
        let mut next_id = EXPERIMENT_ID + 1 + interactors.len();
        for (index, record) in self.records.iter().enumerate() {
            let interaction_id = next_id;
            next_id += 3;
            let refs = [
                interactors[&interactor_key(&record.source)].0,
                interactors[&interactor_key(&record.target)].0,
            ];
            write_interaction(&mut w, index + 1, interaction_id, refs, record)?;
        }
        end(&mut w, "interactionList")?;

        end(&mut w, "entry")?;
        end(&mut w, "entrySet")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> RecordSink for PsimiReport<W> {
    fn emit(&mut self, record: InteractionRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }
}

impl<W: Write> Report for PsimiReport<W> {
    fn finish(&mut self) -> Result<()> {
        self.write_document()
    }
}

fn write_experiment<W: Write>(w: &mut Writer<W>, metadata: &PsimiMetadata) -> Result<()> {
    start(w, "experimentList", &[])?;
    let experiment_id = EXPERIMENT_ID.to_string();
    start(w, "experimentDescription", &[("id", experiment_id.as_str())])?;
    names(w, &metadata.experiment_label, None)?;
    start(w, "bibref", &[])?;
    start(w, "xref", &[])?;
    empty(
        w,
        "primaryRef",
        &[("db", "pubmed"), ("dbAc", "MI:0446"), ("id", metadata.pubmed_id.as_str())],
    )?;
    end(w, "xref")?;
    end(w, "bibref")?;
    start(w, "hostOrganismList", &[])?;
    organism(w, "hostOrganism", &metadata.organism)?;
    end(w, "hostOrganismList")?;
    cv_term(w, "interactionDetectionMethod", &metadata.detection_method)?;
    cv_term(w, "participantIdentificationMethod", &metadata.participant_identification)?;
    end(w, "experimentDescription")?;
    end(w, "experimentList")
}

fn write_interactor<W: Write>(
    w: &mut Writer<W>,
    id: usize,
    participant: &Participant,
    host: &Organism,
) -> Result<()> {
    let id = id.to_string();
    start(w, "interactor", &[("id", id.as_str())])?;
    let full_name = Some(participant.name.as_str()).filter(|name| !name.is_empty());
    names(w, &participant.xref.id, full_name)?;
    start(w, "xref", &[])?;
    empty(
        w,
        "primaryRef",
        &[
            ("db", participant.xref.source.full_name()),
            ("id", participant.xref.id.as_str()),
        ],
    )?;
    end(w, "xref")?;
    cv_term(w, "interactorType", &interactor_type(&participant.molecular_type))?;
    organism(w, "organism", host)?;
    end(w, "interactor")
}

fn write_interaction<W: Write>(
    w: &mut Writer<W>,
    ordinal: usize,
    id: usize,
    interactor_refs: [usize; 2],
    record: &InteractionRecord,
) -> Result<()> {
    let interaction_id = id.to_string();
    start(w, "interaction", &[("id", interaction_id.as_str())])?;
    let pathway = Some(record.pathway.as_str()).filter(|name| !name.is_empty());
    names(w, &format!("interaction{ordinal}"), pathway)?;
    start(w, "experimentList", &[])?;
    text_element(w, "experimentRef", &EXPERIMENT_ID.to_string())?;
    end(w, "experimentList")?;

    start(w, "participantList", &[])?;
    for (offset, interactor_ref) in interactor_refs.iter().enumerate() {
        let participant_id = (id + 1 + offset).to_string();
        start(w, "participant", &[("id", participant_id.as_str())])?;
        text_element(w, "interactorRef", &interactor_ref.to_string())?;
        cv_term(w, "biologicalRole", &unspecified_role())?;
        start(w, "experimentalRoleList", &[])?;
        cv_term(w, "experimentalRole", &unspecified_role())?;
        end(w, "experimentalRoleList")?;
        end(w, "participant")?;
    }
    end(w, "participantList")?;

    cv_term(w, "interactionType", &interaction_type(&record.kind))?;

    if let InteractionKind::Drawn(label) = &record.kind {
        start(w, "attributeList", &[])?;
        start(w, "attribute", &[("name", "line type")])?;
        w.write_event(Event::Text(BytesText::new(label)))?;
        end(w, "attribute")?;
        end(w, "attributeList")?;
    }
    end(w, "interaction")
}

fn cv_term<W: Write>(w: &mut Writer<W>, element: &str, term: &CvTerm) -> Result<()> {
    start(w, element, &[])?;
    names(w, &term.label, None)?;
    start(w, "xref", &[])?;
    empty(
        w,
        "primaryRef",
        &[
            ("db", "psi-mi"),
            ("dbAc", "MI:0488"),
            ("id", term.id.as_str()),
            ("refType", "identity"),
            ("refTypeAc", "MI:0356"),
        ],
    )?;
    end(w, "xref")?;
    end(w, element)
}

fn organism<W: Write>(w: &mut Writer<W>, element: &str, organism: &Organism) -> Result<()> {
    let tax_id = organism.tax_id.to_string();
    start(w, element, &[("ncbiTaxId", tax_id.as_str())])?;
    names(w, &organism.short_label, Some(organism.full_name.as_str()))?;
    end(w, element)
}

fn names<W: Write>(w: &mut Writer<W>, short_label: &str, full_name: Option<&str>) -> Result<()> {
    start(w, "names", &[])?;
    text_element(w, "shortLabel", short_label)?;
    if let Some(full_name) = full_name {
        text_element(w, "fullName", full_name)?;
    }
    end(w, "names")
}

fn text_element<W: Write>(w: &mut Writer<W>, element: &str, text: &str) -> Result<()> {
    start(w, element, &[])?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, element)
}

fn start<W: Write>(w: &mut Writer<W>, element: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let mut tag = BytesStart::new(element);
    for attribute in attributes {
        tag.push_attribute(*attribute);
    }
    w.write_event(Event::Start(tag))?;
    Ok(())
}

fn empty<W: Write>(w: &mut Writer<W>, element: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let mut tag = BytesStart::new(element);
    for attribute in attributes {
        tag.push_attribute(*attribute);
    }
    w.write_event(Event::Empty(tag))?;
    Ok(())
}

fn end<W: Write>(w: &mut Writer<W>, element: &str) -> Result<()> {
    w.write_event(Event::End(BytesEnd::new(element)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;
    use crate::datasource::DataSource;
    use crate::report::tests::{record, sample_records};

    fn render(records: Vec<InteractionRecord>) -> String {
        let mut report = PsimiReport::new(Vec::new(), PsimiMetadata::default());
        for record in records {
            report.emit(record).unwrap();
        }
        report.finish().unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn document_is_well_formed_with_shared_interactors() {
        let xml = render(sample_records());
        let doc = Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert!(root.has_tag_name("entrySet"));
        assert_eq!(root.attribute("minorVersion"), Some("4"));

        let interactors: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("interactor"))
            .collect();
        assert_eq!(interactors.len(), 3);
        assert_eq!(interactors[0].attribute("id"), Some("2"));

        let interactions: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("interaction"))
            .collect();
        assert_eq!(interactions.len(), 2);
        let refs: Vec<_> = interactions[1]
            .descendants()
            .filter(|n| n.has_tag_name("interactorRef"))
            .filter_map(|n| n.text())
            .collect();
        assert_eq!(refs, vec!["2", "4"]);
    }

    #[test]
    fn interaction_and_interactor_types_follow_the_record() {
        let xml = render(sample_records());
        let doc = Document::parse(&xml).unwrap();
        let type_ids = |element: &str| -> Vec<String> {
            doc.descendants()
                .filter(|n| n.has_tag_name(element))
                .filter_map(|n| {
                    n.descendants()
                        .find(|c| c.has_tag_name("primaryRef"))
                        .and_then(|c| c.attribute("id"))
                        .map(str::to_string)
                })
                .collect()
        };
        assert_eq!(type_ids("interactionType"), vec!["MI:0407", "MI:0195"]);
        assert_eq!(type_ids("interactorType"), vec!["MI:0326", "MI:0328", "MI:0250"]);
        assert!(xml.contains(r#"<attribute name="line type">binding</attribute>"#));
    }

    #[test]
    fn same_reference_with_different_types_gives_separate_interactors() {
        let entrez = DataSource::from_code("L");
        let xml = render(vec![
            record(
                ("7157", entrez.clone(), MolecularType::Protein),
                ("C1", DataSource::CHEBI, MolecularType::Metabolite),
                InteractionKind::Drawn("Arrow".into()),
            ),
            record(
                ("7157", entrez, MolecularType::GeneProduct),
                ("C1", DataSource::CHEBI, MolecularType::Metabolite),
                InteractionKind::Drawn("Arrow".into()),
            ),
        ]);
        let doc = Document::parse(&xml).unwrap();
        let interactor_types: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("interactor"))
            .filter_map(|n| {
                n.children()
                    .find(|c| c.has_tag_name("interactorType"))
                    .and_then(|t| t.descendants().find(|c| c.has_tag_name("shortLabel")))
                    .and_then(|label| label.text())
            })
            .collect();
        assert_eq!(interactor_types, vec!["protein", "small molecule", "gene"]);
    }

    #[test]
    fn empty_document_still_has_experiment() {
        let xml = render(Vec::new());
        let doc = Document::parse(&xml).unwrap();
        assert!(doc.descendants().any(|n| n.has_tag_name("experimentDescription")));
        assert!(!doc.descendants().any(|n| n.has_tag_name("interaction")));
    }
}
