//! TOML configuration.
//!
//! Every field is optional; command-line flags override what the file sets
//! and the file overrides the built-in defaults.
//!
//! ```toml
//! [conversion]
//! format = "psimi"
//! complex_pairing = "literal"
//! extended_columns = true
//!
//! [psimi]
//! source = "WikiPathways"
//! organism = { tax_id = 10090, short_label = "mouse", full_name = "Mus musculus" }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::ComplexPairing;
use crate::report::{PsimiMetadata, ReportFormat};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub conversion: ConversionConfig,
    pub psimi: PsimiMetadata,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub format: ReportFormat,
    pub complex_pairing: ComplexPairing,
    pub extended_columns: bool,
}

/// Load the configuration file at `path`, or the defaults when no path is
/// given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        return Err(Error::MissingConfig(path.to_path_buf()));
    }
    info!(path = path.display().to_string(); "Loading configuration");
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig> {
    toml::from_str(content).map_err(|err| Error::Config(err.to_string()))
}
