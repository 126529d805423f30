//! tidypost: cleaning and summary statistics for social-media post datasets.
//!
//! A run loads a CSV of posts into a typed [`Table`], cleans it in four fixed
//! passes, writes the cleaned table back to CSV and computes a few aggregations.
//!
//! # Cleaning passes
//!
//! 1. **Fill missing**: absent likes/retweets become `0`, absent hashtags and
//!    messages become empty text
//! 2. **Coerce types**: dates are parsed leniently (unparseable values are marked
//!    invalid), counts become integers
//! 3. **Deduplicate**: exact duplicate rows are dropped, first occurrence kept
//! 4. **Normalize text**: whitespace runs in messages collapse to one space
//!
//! # Example
//!
//! ```no_run
//! use tidypost::Pipeline;
//!
//! let report = Pipeline::new()
//!     .run("social_media_dataset.csv", "cleaned_social_media_dataset.csv")
//!     .unwrap();
//!
//! println!("Unique hashtags: {}", report.analysis.unique_hashtags);
//! ```

pub mod analysis;
pub mod clean;
pub mod error;
pub mod input;
pub mod model;
pub mod output;

mod pipeline;

pub use crate::pipeline::{Pipeline, PipelineConfig, RunReport, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use analysis::{AnalysisSummary, Analyzer, Engagement, UserCount};
pub use clean::{CleanReport, CleanStage, Cleaner, StageReport};
pub use error::{ErrorKind, Result, TidyError};
pub use input::{Loader, LoaderConfig, SourceMetadata};
pub use model::{Count, DateValue, Field, Record, RecordKey, Table, TableOverview};
pub use output::Writer;
