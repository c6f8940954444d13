//! Batch conversion of a pathway directory into one report.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::assembler::InteractionAssembler;
use crate::catalog::EntityCatalog;
use crate::complex::resolve_complexes;
use crate::error::{Error, Result};
use crate::gpml;
use crate::mapping::{IdMapper, IdMapperStack};
use crate::model::{ComplexPairing, Pathway};
use crate::report::{create_report, RecordSink, Report, ReportFormat, ReportOptions};
use crate::resolver::IdResolver;

#[derive(Clone, Debug)]
pub struct ConvertConfig {
    pub pathway_dir: PathBuf,
    pub mapping_dir: PathBuf,
    pub output: PathBuf,
    pub format: ReportFormat,
    pub pairing: ComplexPairing,
    pub report: ReportOptions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathwayStats {
    pub entities: usize,
    pub complexes: usize,
    pub connection_records: usize,
    pub complex_records: usize,
}

impl PathwayStats {
    pub fn records(&self) -> usize {
        self.connection_records + self.complex_records
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub mapping_sources: usize,
    pub pathways: usize,
    pub skipped: usize,
    pub records: usize,
}

/// Convert one pathway, streaming its records into `sink`.
pub fn convert_pathway(
    pathway: &Pathway,
    resolver: &IdResolver,
    pairing: ComplexPairing,
    sink: &mut dyn RecordSink,
) -> Result<PathwayStats> {
    let catalog = EntityCatalog::build(&pathway.elements);
    let complexes = resolve_complexes(&pathway.elements, &catalog);
    let assembler = InteractionAssembler::new(resolver, pairing);

    let connection_records = assembler.assemble_connections(pathway, &catalog, sink)?;
    let complex_records = assembler.assemble_complexes(pathway, &complexes, sink)?;

    Ok(PathwayStats {
        entities: catalog.len(),
        complexes: complexes.len(),
        connection_records,
        complex_records,
    })
}

/// Convert every pathway file in `dir`. Files that cannot be read as GPML
/// are logged and skipped; write failures abort.
pub fn convert_dir(
    dir: &Path,
    mapper: &dyn IdMapper,
    pairing: ComplexPairing,
    sink: &mut dyn RecordSink,
) -> Result<BatchSummary> {
    let files = pathway_files(dir)?;
    convert_files(&files, mapper, pairing, sink)
}

fn convert_files(
    files: &[PathBuf],
    mapper: &dyn IdMapper,
    pairing: ComplexPairing,
    sink: &mut dyn RecordSink,
) -> Result<BatchSummary> {
    let resolver = IdResolver::new(mapper);
    let mut summary = BatchSummary::default();

    for file in files {
        let pathway = match gpml::read_pathway(file) {
            Ok(pathway) => pathway,
            Err(err) => {
                warn!(file = file.display().to_string(), error = err.to_string(); "Skipping pathway");
                summary.skipped += 1;
                continue;
            }
        };

        let stats = convert_pathway(&pathway, &resolver, pairing, sink)?;
        info!(
            file = file.display().to_string(),
            pathway = pathway.name.as_str(),
            organism = pathway.organism.as_deref().unwrap_or("unknown"),
            records = stats.records();
            "Converted pathway"
        );
        debug!(stats:?; "Pathway statistics");
        summary.pathways += 1;
        summary.records += stats.records();
    }
    Ok(summary)
}

/// Run a whole conversion: load the mapping databases, convert every
/// pathway and write the report.
pub fn run(config: &ConvertConfig) -> Result<BatchSummary> {
    let stack = IdMapperStack::load_dir(&config.mapping_dir)?;
    info!(sources = stack.names().collect::<Vec<_>>().join(", "); "Mapping stack ready");
    // The output is only created once the pathway directory is readable.
    let files = pathway_files(&config.pathway_dir)?;

    let file = File::create(&config.output).map_err(|source| Error::Output {
        path: config.output.clone(),
        source,
    })?;
    let mut report = create_report(config.format, BufWriter::new(file), &config.report);

    let mut summary = convert_files(&files, &stack, config.pairing, &mut report)?;
    report.finish()?;

    summary.mapping_sources = stack.len();
    info!(
        pathways = summary.pathways,
        skipped = summary.skipped,
        records = summary.records,
        output = config.output.display().to_string();
        "Conversion finished"
    );
    Ok(summary)
}

fn pathway_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'));
        if path.is_file() && !hidden {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
