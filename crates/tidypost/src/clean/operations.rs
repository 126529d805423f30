//! Cleaning stages and the reports they produce.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum row audits kept per stage.
pub const MAX_AUDITS: usize = 100;

/// One of the four cleaning passes, in the order they must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanStage {
    FillMissing,
    CoerceTypes,
    Deduplicate,
    NormalizeText,
}

impl CleanStage {
    /// All stages in execution order.
    pub const ORDER: [CleanStage; 4] = [
        CleanStage::FillMissing,
        CleanStage::CoerceTypes,
        CleanStage::Deduplicate,
        CleanStage::NormalizeText,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CleanStage::FillMissing => "fill missing values",
            CleanStage::CoerceTypes => "coerce types",
            CleanStage::Deduplicate => "remove duplicates",
            CleanStage::NormalizeText => "normalize text",
        }
    }
}

/// Audit information for a single cell change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAudit {
    /// Row index (0-based) at the time the stage ran.
    pub row: usize,

    /// Column that was changed.
    pub column: String,

    /// Value before the stage.
    pub original_value: String,

    /// Value after the stage.
    pub new_value: String,

    /// Reason for the change.
    pub reason: String,
}

/// Result of running one stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: CleanStage,

    /// Human-readable summary.
    pub description: String,

    /// Number of cell values changed.
    pub values_changed: usize,

    /// Number of rows dropped.
    pub rows_removed: usize,

    /// Per-cell audit entries, capped at [`MAX_AUDITS`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_audits: Vec<RowAudit>,
}

impl StageReport {
    pub fn new(stage: CleanStage) -> Self {
        Self {
            stage,
            description: String::new(),
            values_changed: 0,
            rows_removed: 0,
            row_audits: Vec::new(),
        }
    }

    /// Record one changed value.
    pub fn record_change(&mut self, audit: RowAudit) {
        self.values_changed += 1;
        if self.row_audits.len() < MAX_AUDITS {
            self.row_audits.push(audit);
        }
    }
}

/// Result of the full cleaning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanReport {
    /// Reports for each stage, in execution order.
    pub stages: Vec<StageReport>,

    /// Absent values per column before missing-value handling.
    pub missing_before: IndexMap<String, usize>,

    /// Absent values per column after missing-value handling.
    pub missing_after: IndexMap<String, usize>,

    /// Duplicate rows before removal.
    pub duplicates_before: usize,

    /// Duplicate rows after removal.
    pub duplicates_after: usize,

    /// Dates that were present but could not be parsed.
    pub invalid_dates: usize,
}

impl CleanReport {
    pub fn stage(&self, stage: CleanStage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Total values changed across all stages.
    pub fn values_changed(&self) -> usize {
        self.stages.iter().map(|s| s.values_changed).sum()
    }

    pub fn rows_removed(&self) -> usize {
        self.stages.iter().map(|s| s.rows_removed).sum()
    }
}
