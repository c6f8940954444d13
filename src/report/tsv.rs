use std::io::Write;

use crate::error::Result;
use crate::model::InteractionRecord;

use super::{RecordSink, Report};

const HEADER: &str = "Source\tNodeType\tTarget\tNodeType\tInteractionType";
const EXTENDED_HEADER: &str = "\tSourceName\tTargetName\tPathway";

/// Tab-separated interaction table, written row by row.
pub struct TsvReport<W: Write> {
    out: W,
    extended: bool,
    header_written: bool,
}

impl<W: Write> TsvReport<W> {
    pub fn new(out: W, extended: bool) -> Self {
        Self {
            out,
            extended,
            header_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            write!(self.out, "{HEADER}")?;
            if self.extended {
                write!(self.out, "{EXTENDED_HEADER}")?;
            }
            writeln!(self.out)?;
            self.header_written = true;
        }
        Ok(())
    }
}

/// Tabs and line breaks inside a cell would break the row structure.
fn cell(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

impl<W: Write> RecordSink for TsvReport<W> {
    fn emit(&mut self, record: InteractionRecord) -> Result<()> {
        self.write_header()?;
        write!(
            self.out,
            "{}\t{}\t{}\t{}\t{}",
            record.source.xref,
            cell(record.source.molecular_type.label()),
            record.target.xref,
            cell(record.target.molecular_type.label()),
            cell(record.kind.label()),
        )?;
        if self.extended {
            write!(
                self.out,
                "\t{}\t{}\t{}",
                cell(&record.source.name),
                cell(&record.target.name),
                cell(&record.pathway),
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Report for TsvReport<W> {
    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_records;

    fn render(extended: bool) -> String {
        let mut report = TsvReport::new(Vec::new(), extended);
        for record in sample_records() {
            report.emit(record).unwrap();
        }
        report.finish().unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn writes_header_once_and_one_row_per_record() {
        let output = render(false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Source\tNodeType\tTarget\tNodeType\tInteractionType",
                "S:Q1\tProtein\tCe:C1\tMetabolite\tbinding",
                "S:Q1\tProtein\tEn:ENSG1\tGeneProduct\tcovalent binding",
            ]
        );
    }

    #[test]
    fn extended_columns_carry_names_and_pathway() {
        let output = render(true);
        let lines: Vec<_> = output.lines().collect();
        assert!(lines[0].ends_with("\tSourceName\tTargetName\tPathway"));
        assert_eq!(
            lines[1],
            "S:Q1\tProtein\tCe:C1\tMetabolite\tbinding\tQ1 name\tC1 name\tApoptosis"
        );
    }

    #[test]
    fn empty_report_still_has_header() {
        let mut report = TsvReport::new(Vec::new(), false);
        report.finish().unwrap();
        let output = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(output, format!("{HEADER}\n"));
    }
}
