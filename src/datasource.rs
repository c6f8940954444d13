//! Identifier namespaces and cross-references.
//!
//! A [`DataSource`] is identified by its BridgeDb system code, which is how
//! mapping databases key their links. GPML files name databases by their
//! full name (`Xref/@Database`), so the BridgeDb registry bundled in
//! `datasources.tsv` translates between the two. Anything outside the
//! registry still round-trips: an unknown full name becomes a source whose
//! code is the name itself.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

const REGISTRY_TABLE: &str = include_str!("datasources.tsv");

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Lookup tables over the bundled registry.
struct Registry {
    /// System code to full name.
    names: HashMap<&'static str, &'static str>,
    /// Lower-cased full name or alias to system code.
    codes: HashMap<String, &'static str>,
}

impl Registry {
    /// Each line is `full name<TAB>code[<TAB>alias,alias...]`; `#` starts a
    /// comment line. The first entry for a name or code wins.
    fn parse(table: &'static str) -> Self {
        let mut names = HashMap::new();
        let mut codes = HashMap::new();
        for line in table.lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t').map(str::trim);
            let (Some(full_name), Some(code)) = (fields.next(), fields.next()) else {
                continue;
            };
            if full_name.is_empty() || code.is_empty() {
                continue;
            }
            names.entry(code).or_insert(full_name);
            codes.entry(full_name.to_lowercase()).or_insert(code);
            let aliases = fields.next().unwrap_or_default();
            for alias in aliases.split(',').map(str::trim).filter(|alias| !alias.is_empty()) {
                codes.entry(alias.to_lowercase()).or_insert(code);
            }
        }
        Self { names, codes }
    }
}

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| Registry::parse(REGISTRY_TABLE))
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataSource(Cow<'static, str>);

impl DataSource {
    pub const ENSEMBL: DataSource = DataSource(Cow::Borrowed("En"));
    pub const CHEBI: DataSource = DataSource(Cow::Borrowed("Ce"));
    pub const UNIPROT_TREMBL: DataSource = DataSource(Cow::Borrowed("S"));
    /// Placeholder used when a reference has no namespace at all. It is not a
    /// real database, it only keeps constructed references well-formed.
    pub const UNSPECIFIED: DataSource = DataSource(Cow::Borrowed("ck"));

    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        match registry().names.get_key_value(code.as_str()) {
            Some((known, _)) => DataSource(Cow::Borrowed(*known)),
            None => DataSource(Cow::Owned(code)),
        }
    }

    /// Look a source up by the full name GPML stores in `Xref/@Database`.
    /// Returns `None` for an empty name, which GPML uses for "no database".
    pub fn from_full_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let source = match registry().codes.get(&name.to_lowercase()) {
            Some(code) => DataSource(Cow::Borrowed(*code)),
            None => DataSource(Cow::Owned(name.to_string())),
        };
        Some(source)
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn full_name(&self) -> &str {
        registry()
            .names
            .get(self.code())
            .copied()
            .unwrap_or_else(|| self.code())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An identifier qualified by the namespace it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Xref {
    pub id: String,
    pub source: DataSource,
}

impl Xref {
    pub fn new(id: impl Into<String>, source: DataSource) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

impl fmt::Display for Xref {
    /// BridgeDb's compact `code:id` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.code(), self.id)
    }
}
