//! Pipeline driver: load, clean, save, analyze.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::analysis::{AnalysisSummary, Analyzer, DEFAULT_TOP_USERS};
use crate::clean::{CleanReport, Cleaner};
use crate::error::Result;
use crate::input::{Loader, LoaderConfig, SourceMetadata};
use crate::model::TableOverview;
use crate::output::Writer;

/// Default input path when none is given.
pub const DEFAULT_INPUT: &str = "social_media_dataset.csv";

/// Default output path when none is given.
pub const DEFAULT_OUTPUT: &str = "cleaned_social_media_dataset.csv";

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Loader configuration.
    pub loader: LoaderConfig,
    /// Number of users in the top-users ranking.
    pub top_users: usize,
    /// Rows captured in the initial overview.
    pub head_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            top_users: DEFAULT_TOP_USERS,
            head_rows: 5,
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Metadata about the input file.
    pub source: SourceMetadata,
    /// Structure of the table as loaded.
    pub overview: TableOverview,
    /// What cleaning changed.
    pub cleaning: CleanReport,
    /// Where the cleaned table was written.
    pub output: PathBuf,
    /// Rows in the cleaned table.
    pub cleaned_rows: usize,
    /// Aggregations over the cleaned table.
    pub analysis: AnalysisSummary,
}

impl RunReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the full load → clean → save → analyze sequence.
pub struct Pipeline {
    config: PipelineConfig,
    loader: Loader,
    cleaner: Cleaner,
    writer: Writer,
    analyzer: Analyzer,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let loader = Loader::with_config(config.loader.clone());
        let writer = Writer::with_delimiter(config.loader.delimiter);
        let analyzer = Analyzer::with_top_users(config.top_users);

        Self {
            config,
            loader,
            cleaner: Cleaner::new(),
            writer,
            analyzer,
        }
    }

    /// Run every stage. Any failure aborts the run.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RunReport> {
        let input = input.as_ref();
        let output = output.as_ref();
        let _span = info_span!("pipeline", input = %input.display()).entered();

        let (table, source) = self.loader.load(input)?;
        let overview = table.overview(self.config.head_rows);

        let (table, cleaning) = self.cleaner.clean(table)?;
        self.writer.write(&table, output)?;

        let analysis = self.analyzer.summarize(&table)?;

        Ok(RunReport {
            source,
            overview,
            cleaning,
            output: output.to_path_buf(),
            cleaned_rows: table.row_count(),
            analysis,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
