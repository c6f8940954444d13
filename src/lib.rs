//! Convert GPML pathway diagrams into molecular-interaction reports.
//!
//! For every pathway the converter
//!
//! 1. catalogs the annotated data nodes ([`catalog`]),
//! 2. collects the members of each molecular complex ([`complex`]),
//! 3. rewrites every identifier into the namespace preferred for its
//!    molecular type through a stack of identifier-mapping databases
//!    ([`resolver`], [`mapping`]),
//! 4. pairs entities into interaction records from drawn lines and complex
//!    co-membership ([`assembler`]),
//!
//! and writes all records of a run into one TSV, PSI-MI XML or unique-term
//! report ([`report`]). [`pipeline::run`] drives a whole directory.

pub mod assembler;
pub mod catalog;
pub mod complex;
pub mod config;
pub mod datasource;
pub mod error;
pub mod gpml;
pub mod mapping;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use datasource::{DataSource, Xref};
pub use error::{Error, Result};
pub use mapping::{IdMapper, IdMapperStack, InMemoryMapper, MappingError, SqliteMapper};
pub use model::{ComplexPairing, InteractionKind, InteractionRecord, MolecularType, Pathway};
pub use pipeline::{run, BatchSummary, ConvertConfig};
pub use report::{ReportFormat, ReportOptions};
pub use resolver::{IdResolver, Resolution};
