//! The four cleaning passes.
//!
//! Each pass takes the table by value and hands it back transformed, with a
//! report of what changed.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Result, TidyError};
use crate::model::{Count, DateValue, Table};

use super::dates::parse_timestamp;
use super::operations::{CleanStage, RowAudit, StageReport};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value, " ").trim().to_string()
}

/// Replace absent likes/retweets with 0 and absent hashtags/message with "".
pub fn fill_missing(mut table: Table) -> (Table, StageReport) {
    let mut report = StageReport::new(CleanStage::FillMissing);

    for (row, record) in table.records_mut().iter_mut().enumerate() {
        for (column, count) in [("likes", &mut record.likes), ("retweets", &mut record.retweets)] {
            if count.is_missing() {
                *count = Count::Value(0);
                report.record_change(fill_audit(row, column, "0"));
            }
        }
        for (column, text) in [
            ("hashtags", &mut record.hashtags),
            ("message", &mut record.message),
        ] {
            if text.is_none() {
                *text = Some(String::new());
                report.record_change(fill_audit(row, column, ""));
            }
        }
    }

    report.description = format!("Filled {} missing value(s)", report.values_changed);
    debug!(filled = report.values_changed, "filled missing values");
    (table, report)
}

fn fill_audit(row: usize, column: &str, new_value: &str) -> RowAudit {
    RowAudit {
        row,
        column: column.to_string(),
        original_value: String::new(),
        new_value: new_value.to_string(),
        reason: "Missing value replaced with default".to_string(),
    }
}

/// Parse dates leniently and convert likes/retweets to integers.
///
/// Unparseable dates become [`DateValue::Invalid`] and the record is kept.
/// An absent or non-integer count is a field-type error: missing values must
/// be filled before this pass runs.
pub fn coerce_types(mut table: Table) -> Result<(Table, StageReport)> {
    let mut report = StageReport::new(CleanStage::CoerceTypes);
    let mut invalid = 0;

    for (row, record) in table.records_mut().iter_mut().enumerate() {
        if let DateValue::Raw(raw) = &record.date {
            match parse_timestamp(raw) {
                Some(ts) => {
                    record.date = DateValue::Parsed(ts);
                    report.values_changed += 1;
                }
                None => {
                    report.record_change(RowAudit {
                        row,
                        column: "date".to_string(),
                        original_value: raw.clone(),
                        new_value: String::new(),
                        reason: format!("Could not parse '{}' as a date", raw),
                    });
                    record.date = DateValue::Invalid;
                    invalid += 1;
                }
            }
        }

        for (column, count) in [("likes", &mut record.likes), ("retweets", &mut record.retweets)] {
            if let Some(coerced) = coerce_count(row, column, count)? {
                *count = Count::Value(coerced);
                report.values_changed += 1;
            }
        }
    }

    if invalid > 0 {
        warn!(invalid, "dates could not be parsed and were marked invalid");
    }
    report.description = format!(
        "Coerced {} value(s); {} invalid date(s)",
        report.values_changed, invalid
    );
    Ok((table, report))
}

/// Returns the coerced value, or `None` when the count is already an integer.
fn coerce_count(row: usize, column: &str, count: &Count) -> Result<Option<u64>> {
    let raw = match count {
        Count::Value(_) => return Ok(None),
        Count::Missing => {
            return Err(TidyError::field_type(
                row,
                column,
                "absent count reached type coercion; fill missing values first",
            ));
        }
        Count::Raw(raw) => raw.trim(),
    };

    if let Ok(n) = raw.parse::<u64>() {
        return Ok(Some(n));
    }

    // Whole floats such as "12.0" are accepted
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => {
            Ok(Some(f as u64))
        }
        Ok(f) if f < 0.0 => Err(TidyError::field_type(
            row,
            column,
            format!("negative count '{}'", raw),
        )),
        _ => Err(TidyError::field_type(
            row,
            column,
            format!("cannot convert '{}' to an integer", raw),
        )),
    }
}

/// Drop records equal to an earlier record, keeping the first occurrence.
///
/// An invalid date and a missing date count as the same value, since both
/// are written as an empty cell.
pub fn deduplicate(mut table: Table) -> (Table, StageReport) {
    let mut report = StageReport::new(CleanStage::Deduplicate);
    let before = table.row_count();

    let records = std::mem::take(table.records_mut());
    let first: Vec<bool> = {
        let mut seen = HashSet::with_capacity(records.len());
        records.iter().map(|r| seen.insert(r.dedup_key())).collect()
    };
    *table.records_mut() = records
        .into_iter()
        .zip(first)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect();

    report.rows_removed = before - table.row_count();
    report.description = format!("Removed {} duplicate row(s)", report.rows_removed);
    debug!(removed = report.rows_removed, "removed duplicate rows");
    (table, report)
}

/// Collapse whitespace in every message.
///
/// An absent message is a field-type error rather than being coerced.
pub fn normalize_text(mut table: Table) -> Result<(Table, StageReport)> {
    let mut report = StageReport::new(CleanStage::NormalizeText);

    for (row, record) in table.records_mut().iter_mut().enumerate() {
        let message = record.message.as_mut().ok_or_else(|| {
            TidyError::field_type(row, "message", "absent message reached text normalization")
        })?;

        let normalized = normalize_whitespace(message);
        if normalized != *message {
            report.record_change(RowAudit {
                row,
                column: "message".to_string(),
                original_value: std::mem::take(message),
                new_value: normalized.clone(),
                reason: "Collapsed whitespace".to_string(),
            });
            *message = normalized;
        }
    }

    report.description = format!("Normalized {} message(s)", report.values_changed);
    debug!(normalized = report.values_changed, "normalized message text");
    Ok((table, report))
}
