//! Cleaning engine that runs the passes in their fixed order.

use tracing::info;

use crate::error::Result;
use crate::model::{DateValue, Table};

use super::operations::{CleanReport, CleanStage, StageReport};
use super::passes::{coerce_types, deduplicate, fill_missing, normalize_text};

/// Runs the cleaning passes over a table.
pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    /// Run every pass in order: fill missing, coerce types, deduplicate,
    /// normalize text.
    ///
    /// Deduplication runs after coercion so that equivalent values such as
    /// `"0"` and an absent count collapse together.
    pub fn clean(&self, table: Table) -> Result<(Table, CleanReport)> {
        let mut report = CleanReport::default();
        let mut table = table;
        for stage in CleanStage::ORDER {
            if stage == CleanStage::FillMissing {
                report.missing_before = table.missing_counts();
            }
            if stage == CleanStage::Deduplicate {
                report.duplicates_before = table.duplicate_count();
            }

            let (next, stage_report) = self.run_stage(stage, table)?;
            table = next;

            match stage {
                CleanStage::FillMissing => report.missing_after = table.missing_counts(),
                CleanStage::CoerceTypes => {
                    report.invalid_dates = table
                        .records()
                        .iter()
                        .filter(|r| r.date == DateValue::Invalid)
                        .count();
                }
                CleanStage::Deduplicate => report.duplicates_after = table.duplicate_count(),
                CleanStage::NormalizeText => {}
            }
            report.stages.push(stage_report);
        }

        info!(
            rows = table.row_count(),
            changed = report.values_changed(),
            removed = report.rows_removed(),
            "cleaned dataset"
        );
        Ok((table, report))
    }

    /// Run a single pass.
    pub fn run_stage(&self, stage: CleanStage, table: Table) -> Result<(Table, StageReport)> {
        match stage {
            CleanStage::FillMissing => Ok(fill_missing(table)),
            CleanStage::CoerceTypes => coerce_types(table),
            CleanStage::Deduplicate => Ok(deduplicate(table)),
            CleanStage::NormalizeText => normalize_text(table),
        }
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}
