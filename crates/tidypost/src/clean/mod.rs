//! Cleaning passes for post tables.

mod dates;
mod engine;
mod operations;
mod passes;

pub use dates::parse_timestamp;
pub use engine::Cleaner;
pub use operations::{CleanReport, CleanStage, RowAudit, StageReport, MAX_AUDITS};
pub use passes::{coerce_types, deduplicate, fill_missing, normalize_text, normalize_whitespace};
