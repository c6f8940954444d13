use std::io::Write;

use indexmap::IndexSet;

use crate::datasource::Xref;
use crate::error::Result;
use crate::model::{InteractionRecord, Participant};

use super::{RecordSink, Report};

const HEADER: &str = "Identifier\tDatabase\tNodeType\tName";

/// Every distinct resolved participant once, in first-seen order.
pub struct TermsReport<W: Write> {
    out: W,
    seen: IndexSet<Xref>,
    header_written: bool,
}

impl<W: Write> TermsReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seen: IndexSet::new(),
            header_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            writeln!(self.out, "{HEADER}")?;
            self.header_written = true;
        }
        Ok(())
    }

    fn write_term(&mut self, participant: &Participant) -> Result<()> {
        if !self.seen.insert(participant.xref.clone()) {
            return Ok(());
        }
        writeln!(
            self.out,
            "{}\t{}\t{}\t{}",
            participant.xref.id,
            participant.xref.source.full_name(),
            participant.molecular_type,
            participant.name.replace(['\t', '\n', '\r'], " "),
        )?;
        Ok(())
    }
}

impl<W: Write> RecordSink for TermsReport<W> {
    fn emit(&mut self, record: InteractionRecord) -> Result<()> {
        self.write_header()?;
        self.write_term(&record.source)?;
        self.write_term(&record.target)
    }
}

impl<W: Write> Report for TermsReport<W> {
    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.out.flush()?;
        Ok(())
    }
}
