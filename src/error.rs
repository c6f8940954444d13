use std::path::PathBuf;

use thiserror::Error;

use crate::mapping::MappingError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse pathway XML: {0}")]
    PathwayXml(#[from] roxmltree::Error),

    #[error("document root is <{0}>, expected a GPML <Pathway>")]
    NotPathway(String),

    #[error("failed to write PSI-MI XML: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("no identifier-mapping database could be loaded from {0}")]
    NoMappingSources(PathBuf),

    #[error("cannot open output {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML configuration: {0}")]
    Config(String),

    #[error("missing configuration file: {0}")]
    MissingConfig(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
