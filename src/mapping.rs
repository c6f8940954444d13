//! Identifier mapping.
//!
//! An [`IdMapper`] translates a reference into equivalent references in a
//! target namespace. Mappers are layered into an [`IdMapperStack`], which is
//! loaded once per run and then only read.

mod memory;
mod sqlite;

pub use memory::InMemoryMapper;
pub use sqlite::SqliteMapper;

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use log::{info, warn};
use thiserror::Error;

use crate::datasource::{DataSource, Xref};
use crate::error::{Error, Result};

/// File extension of identifier-mapping databases.
pub const MAPPING_FILE_EXTENSION: &str = "bridge";

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("mapping database {name} failed: {source}")]
    Database {
        name: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{0} is not an identifier-mapping database (no `link` table)")]
    Schema(PathBuf),

    #[error("mapping source {0} is unavailable")]
    Unavailable(String),
}

pub trait IdMapper {
    /// Human-readable name used in log output.
    fn name(&self) -> &str;

    /// Equivalent references of `xref` in the `target` namespace, in the
    /// mapper's own order.
    fn map_id(&self, xref: &Xref, target: &DataSource) -> std::result::Result<Vec<Xref>, MappingError>;
}

/// Mapping sources queried in load order.
#[derive(Default)]
pub struct IdMapperStack {
    mappers: Vec<Box<dyn IdMapper>>,
}

impl IdMapperStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mapper: impl IdMapper + 'static) {
        self.mappers.push(Box::new(mapper));
    }

    pub fn with(mut self, mapper: impl IdMapper + 'static) -> Self {
        self.push(mapper);
        self
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.mappers.iter().map(|mapper| mapper.name())
    }

    /// Open every mapping database under `dir`.
    ///
    /// Databases that fail to open are logged and skipped; the load only
    /// fails when none could be opened.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        info!(path = dir.display().to_string(); "Loading identifier-mapping databases");
        let mut files = Vec::new();
        collect_mapping_files(dir, &mut files)?;
        files.sort();

        let mut stack = Self::new();
        for file in files {
            match SqliteMapper::open(&file) {
                Ok(mapper) => {
                    info!(file = file.display().to_string(); "Mapping database loaded");
                    stack.push(mapper);
                }
                Err(err) => {
                    warn!(file = file.display().to_string(), error = err.to_string(); "Skipping mapping database")
                }
            }
        }

        if stack.is_empty() {
            return Err(Error::NoMappingSources(dir.to_path_buf()));
        }
        Ok(stack)
    }
}

impl IdMapper for IdMapperStack {
    fn name(&self) -> &str {
        "stack"
    }

    /// Union of every member's results, de-duplicated in first-seen order.
    /// A failing member fails the whole query.
    fn map_id(&self, xref: &Xref, target: &DataSource) -> std::result::Result<Vec<Xref>, MappingError> {
        let mut found = IndexSet::new();
        for mapper in &self.mappers {
            found.extend(mapper.map_id(xref, target)?);
        }
        Ok(found.into_iter().collect())
    }
}

fn collect_mapping_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_mapping_files(&path, files)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(MAPPING_FILE_EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}
