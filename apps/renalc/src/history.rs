//! # History Store
//!
//! Append-only CSV log of saved computation results, one row per record.
//!
//! The calculation engine never touches this file; it only produces
//! [`ComputationResult`] values in the shape appended here. The store is
//! the single shared mutable resource of the application: the server
//! wraps it in a lock, the CLI is a single writer by construction.
//!
//! ## Format
//!
//! Header row followed by data rows. Fixed decimal places as displayed by
//! the original result card: creatinine-in-mg/dL to 3 places, filtration
//! value to 1 place, weight to 0 places. Absent optionals serialize as the
//! empty string. Fields containing comma, quote, or newline are quoted
//! RFC-4180 style; embedded newlines inside fields are not supported.

use renalc_core::{ComputationResult, RenalError};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column header, fixed order. Readers match columns by position.
pub const HISTORY_HEADER: &str = "timestamp,method,age,sex,scr_value,scr_unit,scr_mgdl,\
black,weight_kg,value,value_unit,stage,stage_text,notes";

/// Number of columns in every row.
pub const HISTORY_COLUMNS: usize = 14;

// =============================================================================
// HISTORY ROW
// =============================================================================

/// One parsed history row, all fields as written.
///
/// Rows are read back for display and the JSON API only; they are never
/// converted back into engine records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub timestamp: String,
    pub method: String,
    pub age: String,
    pub sex: String,
    pub scr_value: String,
    pub scr_unit: String,
    pub scr_mgdl: String,
    pub black: String,
    pub weight_kg: String,
    pub value: String,
    pub value_unit: String,
    pub stage: String,
    pub stage_text: String,
    pub notes: String,
}

impl HistoryRow {
    fn from_fields(mut fields: Vec<String>) -> Result<Self, RenalError> {
        if fields.len() != HISTORY_COLUMNS {
            return Err(RenalError::Serialization(format!(
                "history row has {} columns, expected {}",
                fields.len(),
                HISTORY_COLUMNS
            )));
        }
        // Front pops, in HISTORY_HEADER column order.
        let mut next = || fields.remove(0);
        Ok(Self {
            timestamp: next(),
            method: next(),
            age: next(),
            sex: next(),
            scr_value: next(),
            scr_unit: next(),
            scr_mgdl: next(),
            black: next(),
            weight_kg: next(),
            value: next(),
            value_unit: next(),
            stage: next(),
            stage_text: next(),
            notes: next(),
        })
    }
}

// =============================================================================
// CSV PRIMITIVES
// =============================================================================

/// Quote a field when it contains a comma, quote, or newline.
fn escape_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Split one CSV line into fields, honoring quoted fields.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);
    fields
}

/// Serialize a result record into its 14 column values.
fn row_fields(result: &ComputationResult) -> [String; HISTORY_COLUMNS] {
    [
        result.timestamp.clone(),
        result.method.name().to_string(),
        result.age.to_string(),
        result.sex.as_str().to_string(),
        result.scr_value.to_string(),
        result.scr_unit.as_str().to_string(),
        format!("{:.3}", result.scr_mgdl),
        result.black.map(|b| b.to_string()).unwrap_or_default(),
        result
            .weight_kg
            .map(|w| format!("{w:.0}"))
            .unwrap_or_default(),
        format!("{:.1}", result.value),
        result.value_unit.clone(),
        result.stage.code().to_string(),
        result.stage.description().to_string(),
        result.notes.clone(),
    ]
}

// =============================================================================
// HISTORY STORE
// =============================================================================

/// Append-only CSV store at a fixed path.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store over the given path. The file is created lazily on
    /// first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the history file exists on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Append one result as a row. Writes the header first when the file
    /// does not exist yet. Creates parent directories as needed.
    pub fn append(&self, result: &ComputationResult) -> Result<(), RenalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| RenalError::Io(format!("create {:?}: {}", parent, e)))?;
            }
        }

        let fresh = !self.exists();
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RenalError::Io(format!("open {:?}: {}", self.path, e)))?;

        if fresh {
            writeln!(file, "{HISTORY_HEADER}")
                .map_err(|e| RenalError::Io(format!("write header: {e}")))?;
        }

        let line = row_fields(result)
            .iter()
            .map(|f| escape_field(f))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(file, "{line}").map_err(|e| RenalError::Io(format!("write row: {e}")))?;

        tracing::debug!(path = ?self.path, "appended history row");
        Ok(())
    }

    /// Read rows back, most recent last. `limit` keeps only the last N.
    /// A missing file reads as an empty history.
    pub fn read_rows(&self, limit: Option<usize>) -> Result<Vec<HistoryRow>, RenalError> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| RenalError::Io(format!("read {:?}: {}", self.path, e)))?;

        let mut rows = Vec::new();
        for (i, line) in contents.lines().enumerate() {
            if i == 0 || line.is_empty() {
                continue; // header
            }
            rows.push(HistoryRow::from_fields(parse_line(line))?);
        }

        if let Some(n) = limit {
            if rows.len() > n {
                rows.drain(..rows.len() - n);
            }
        }
        Ok(rows)
    }

    /// Raw file bytes, for verbatim export/download.
    pub fn raw_bytes(&self) -> Result<Vec<u8>, RenalError> {
        std::fs::read(&self.path)
            .map_err(|e| RenalError::Io(format!("read {:?}: {}", self.path, e)))
    }

    /// Copy the history file verbatim to `dest`. Returns bytes written.
    pub fn export_to(&self, dest: &Path) -> Result<u64, RenalError> {
        if !self.exists() {
            return Err(RenalError::Io(format!(
                "no history file at {:?}",
                self.path
            )));
        }
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| RenalError::Io(format!("create {:?}: {}", parent, e)))?;
            }
        }
        std::fs::copy(&self.path, dest)
            .map_err(|e| RenalError::Io(format!("copy to {:?}: {}", dest, e)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
