//! Output of interaction records.
//!
//! The assembler hands every record to a [`RecordSink`]. A [`Report`] is a
//! sink that serializes records into one of the supported output formats
//! and is finished once after the last pathway.

mod psimi;
mod terms;
mod tsv;

pub use psimi::{CvTerm, Organism, PsimiMetadata, PsimiReport};
pub use terms::TermsReport;
pub use tsv::TsvReport;

use std::io::Write;

use serde::Deserialize;

use crate::error::Result;
use crate::model::InteractionRecord;

pub trait RecordSink {
    fn emit(&mut self, record: InteractionRecord) -> Result<()>;
}

impl RecordSink for Vec<InteractionRecord> {
    fn emit(&mut self, record: InteractionRecord) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

pub trait Report: RecordSink {
    /// Write anything still buffered and flush the destination.
    fn finish(&mut self) -> Result<()>;
}

impl RecordSink for Box<dyn Report> {
    fn emit(&mut self, record: InteractionRecord) -> Result<()> {
        (**self).emit(record)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Tab-separated interaction table
    #[default]
    Tsv,
    /// PSI-MI XML 2.5.4 document
    Psimi,
    /// Tab-separated list of unique participants
    Terms,
}

#[derive(Clone, Debug, Default)]
pub struct ReportOptions {
    /// Append participant names and the pathway name to each TSV row.
    pub extended_columns: bool,
    pub psimi: PsimiMetadata,
}

pub fn create_report<W: Write + 'static>(
    format: ReportFormat,
    out: W,
    options: &ReportOptions,
) -> Box<dyn Report> {
    match format {
        ReportFormat::Tsv => Box::new(TsvReport::new(out, options.extended_columns)),
        ReportFormat::Psimi => Box::new(PsimiReport::new(out, options.psimi.clone())),
        ReportFormat::Terms => Box::new(TermsReport::new(out)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::datasource::{DataSource, Xref};
    use crate::model::{InteractionKind, InteractionRecord, MolecularType, Participant};

    pub(crate) fn record(source: (&str, DataSource, MolecularType), target: (&str, DataSource, MolecularType), kind: InteractionKind) -> InteractionRecord {
        let participant = |(id, source, molecular_type): (&str, DataSource, MolecularType)| Participant {
            xref: Xref::new(id, source),
            name: format!("{id} name"),
            molecular_type,
        };
        InteractionRecord {
            source: participant(source),
            target: participant(target),
            kind,
            pathway: "Apoptosis".to_string(),
        }
    }

    pub(crate) fn sample_records() -> Vec<InteractionRecord> {
        vec![
            record(
                ("Q1", DataSource::UNIPROT_TREMBL, MolecularType::Protein),
                ("C1", DataSource::CHEBI, MolecularType::Metabolite),
                InteractionKind::Drawn("binding".into()),
            ),
            record(
                ("Q1", DataSource::UNIPROT_TREMBL, MolecularType::Protein),
                ("ENSG1", DataSource::ENSEMBL, MolecularType::GeneProduct),
                InteractionKind::CovalentBinding,
            ),
        ]
    }
}
