//! Property database files.
//!
//! A database lists chemical records, correlation rows and constants. It is read
//! once (YAML or JSON) and converted into the immutable [`CorrelationTable`].

use crate::chemical::ChemicalRecord;
use crate::error::PropsError;
use crate::table::{ConstantRow, CorrelationRow, CorrelationTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[derive(thiserror::Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate chemical id: {id}")]
    Duplicate { id: String },

    #[error("Invalid database: {0}")]
    Invalid(#[from] PropsError),

    #[error("Unsupported database extension: {ext}")]
    UnsupportedFormat { ext: String },
}

/// On-disk database layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseFile {
    #[serde(default)]
    pub chemicals: Vec<ChemicalRecord>,
    #[serde(default)]
    pub coefficients: Vec<CorrelationRow>,
    #[serde(default)]
    pub constants: Vec<ConstantRow>,
}

impl DatabaseFile {
    pub fn validate(&self) -> DatabaseResult<()> {
        let mut seen = HashSet::new();
        for record in &self.chemicals {
            if !seen.insert(&record.id) {
                return Err(DatabaseError::Duplicate {
                    id: record.id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Build the immutable table. Rows are validated by the table itself.
    pub fn into_table(self) -> DatabaseResult<CorrelationTable> {
        self.validate()?;
        let table = CorrelationTable::new(self.chemicals, self.coefficients, self.constants)?;
        tracing::debug!(
            chemicals = table.chemical_count(),
            rows = table.row_count(),
            "correlation table built"
        );
        Ok(table)
    }
}

pub fn parse_yaml(content: &str) -> DatabaseResult<DatabaseFile> {
    let db: DatabaseFile = serde_yaml::from_str(content)?;
    db.validate()?;
    Ok(db)
}

pub fn parse_json(content: &str) -> DatabaseResult<DatabaseFile> {
    let db: DatabaseFile = serde_json::from_str(content)?;
    db.validate()?;
    Ok(db)
}

pub fn load_yaml(path: &Path) -> DatabaseResult<CorrelationTable> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)?.into_table()
}

pub fn load_json(path: &Path) -> DatabaseResult<CorrelationTable> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content)?.into_table()
}

/// Load by file extension (`.yaml`/`.yml` or `.json`).
pub fn load(path: &Path) -> DatabaseResult<CorrelationTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "yaml" | "yml" => load_yaml(path),
        "json" => load_json(path),
        _ => Err(DatabaseError::UnsupportedFormat { ext }),
    }
}

pub fn save_yaml(path: &Path, db: &DatabaseFile) -> DatabaseResult<()> {
    db.validate()?;
    let content = serde_yaml::to_string(db)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn save_json(path: &Path, db: &DatabaseFile) -> DatabaseResult<()> {
    db.validate()?;
    let content = serde_json::to_string_pretty(db)?;
    std::fs::write(path, content)?;
    Ok(())
}
