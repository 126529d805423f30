//! CSV loader for post datasets.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Result, TidyError};
use crate::model::Table;
use super::source::SourceMetadata;

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            max_rows: None,
        }
    }
}

/// Reads delimited post datasets into a [`Table`].
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file and return the table and its source metadata.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| TidyError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.load_bytes(&contents)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded dataset"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse CSV bytes into a table.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(TidyError::EmptyData("No header row found".to_string()));
        }

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        debug!(rows = rows.len(), "parsed csv records");

        Table::from_rows(headers, rows)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
