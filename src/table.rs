use crate::error::PlotError;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Whitespace delimited table as written by the servo dumps:
/// a header line with the column names, then one row per cycle.
/// All the columns are kept as text, numbers are parsed on demand.
#[derive(Debug, Clone)]
pub struct DumpTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DumpTable {
    pub fn from_path(fin: &Path) -> Result<DumpTable, PlotError> {
        let file = File::open(fin).map_err(|source| PlotError::Io {
            path: fin.to_path_buf(),
            source,
        })?;
        let table = DumpTable::parse(BufReader::new(file), fin)?;
        debug!(
            "read {} rows and {} columns from {}",
            table.rows.len(),
            table.header.len(),
            fin.display()
        );
        Ok(table)
    }

    /// Runs of whitespace (spaces, also tabs) count as one delimiter and blank lines are skipped.
    /// `origin` is only used to name the source in errors.
    pub fn parse<R: BufRead>(buf: R, origin: &Path) -> Result<DumpTable, PlotError> {
        let mut header: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<String>> = Vec::new();
        for (i, l) in buf.lines().enumerate() {
            let l = l.map_err(|source| PlotError::Io {
                path: origin.to_path_buf(),
                source,
            })?;
            let fields: Vec<String> = l.split_whitespace().map(String::from).collect();
            if fields.is_empty() {
                continue;
            }
            if let Some(h) = &header {
                if h.len() != fields.len() {
                    return Err(PlotError::RaggedRow {
                        line: i + 1,
                        expected: h.len(),
                        found: fields.len(),
                    });
                }
                rows.push(fields);
            } else {
                header = Some(fields);
            }
        }
        let header = header.ok_or_else(|| PlotError::EmptyInput {
            path: origin.to_path_buf(),
        })?;
        Ok(DumpTable { header, rows })
    }

    /// position of the first column with this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// the raw cells of a column, top to bottom
    pub fn column(&self, name: &str) -> Result<Vec<&str>, PlotError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PlotError::MissingColumn {
                column: name.to_string(),
            })?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
