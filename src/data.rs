//! Tabular dataset loading
//!
//! Loads the CSV the agent will analyze and produces the short description
//! the prompt builder embeds. The analysis itself happens in the agent's
//! execution sandbox; this side only needs the table's shape.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// A loaded tabular dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Display name (configured name, or the file stem)
    pub name: String,
    /// Column headers, in file order
    pub columns: Vec<String>,
    /// Number of data rows
    pub row_count: usize,
}

impl Table {
    /// Load a table from a CSV file with a header row.
    ///
    /// `name` overrides the display name; the file stem is used otherwise.
    pub fn from_csv_path<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let columns: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header row: {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();
        if columns.is_empty() {
            bail!("CSV file has no columns: {}", path.display());
        }

        let mut row_count = 0usize;
        for record in reader.records() {
            record.with_context(|| format!("Malformed CSV record in {}", path.display()))?;
            row_count += 1;
        }

        let name = name.map_or_else(
            || {
                path.file_stem()
                    .map_or_else(|| "dataset".to_string(), |s| s.to_string_lossy().to_string())
            },
            str::to_string,
        );

        Ok(Self {
            name,
            columns,
            row_count,
        })
    }

    /// One-line description used in the agent prompt.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} ({} rows, {} columns: {})",
            self.name,
            self.row_count,
            self.columns.len(),
            self.columns.join(", ")
        )
    }
}
