//! BridgeDb SQLite mapping databases.
//!
//! A database links every secondary identifier (`idRight`, `codeRight`) to
//! the primary identifier it annotates (`idLeft`, `codeLeft`). Two
//! references map to each other when they share a primary identifier.

use std::path::Path;

use rusqlite::{params, Connection, OpenFlags};

use crate::datasource::{DataSource, Xref};

use super::{IdMapper, MappingError};

const MAP_QUERY: &str = "SELECT DISTINCT dest.idRight, dest.codeRight
     FROM link AS src
     JOIN link AS dest ON src.idLeft = dest.idLeft AND src.codeLeft = dest.codeLeft
     WHERE src.idRight = ?1 AND src.codeRight = ?2 AND dest.codeRight = ?3
     ORDER BY dest.idRight";

pub struct SqliteMapper {
    name: String,
    conn: Connection,
}

impl SqliteMapper {
    /// Open a database read-only and check it has the `link` table.
    pub fn open(path: &Path) -> Result<Self, MappingError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| MappingError::Database {
            name: name.clone(),
            source,
        })?;

        let tables: i64 = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = 'link'",
                [],
                |row| row.get(0),
            )
            .map_err(|source| MappingError::Database {
                name: name.clone(),
                source,
            })?;
        if tables == 0 {
            return Err(MappingError::Schema(path.to_path_buf()));
        }

        Ok(Self { name, conn })
    }

    fn query(&self, xref: &Xref, target: &DataSource) -> rusqlite::Result<Vec<Xref>> {
        let mut stmt = self.conn.prepare_cached(MAP_QUERY)?;
        let rows = stmt.query_map(params![xref.id, xref.source.code(), target.code()], |row| {
            Ok(Xref::new(
                row.get::<_, String>(0)?,
                DataSource::from_code(row.get::<_, String>(1)?),
            ))
        })?;
        rows.collect()
    }
}

impl IdMapper for SqliteMapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn map_id(&self, xref: &Xref, target: &DataSource) -> Result<Vec<Xref>, MappingError> {
        self.query(xref, target)
            .map_err(|source| MappingError::Database {
                name: self.name.clone(),
                source,
            })
    }
}
