//! The in-memory post table.

use std::collections::HashSet;

use chrono::Timelike;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TidyError};

use super::record::{cell, Count, DateValue, Field, Record, REQUIRED_COLUMNS};

/// Date format used when at least one parsed date carries a time of day.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format used when every parsed date falls on midnight.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inferred kind of a column's values, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Float,
    Datetime,
    Text,
    /// No non-null values.
    Empty,
}

/// Summary of one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub name: String,
    pub non_null: usize,
    pub kind: ColumnKind,
}

/// Structure of a table plus its first rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOverview {
    pub rows: usize,
    pub columns: Vec<ColumnOverview>,
    /// First rows, rendered as they would be written.
    pub head: Vec<Vec<String>>,
}

/// An ordered collection of post records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    layout: Vec<Field>,
    records: Vec<Record>,
}

impl Table {
    /// Build a table from a header row and raw string rows.
    ///
    /// Every required column must be present. Short rows are padded with
    /// absent values; a row longer than the header is rejected.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let layout = bind_columns(&headers)?;
        let extra_count = layout
            .iter()
            .filter(|f| matches!(f, Field::Extra(_)))
            .count();

        let mut records = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() > headers.len() {
                return Err(TidyError::Parse {
                    row: row_idx,
                    message: format!(
                        "expected {} fields, found {}",
                        headers.len(),
                        row.len()
                    ),
                });
            }
            records.push(build_record(&layout, extra_count, &row));
        }

        Ok(Self {
            headers,
            layout,
            records,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Field binding of each column, in header order.
    pub fn layout(&self) -> &[Field] {
        &self.layout
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of absent values per column, in header order.
    pub fn missing_counts(&self) -> IndexMap<String, usize> {
        self.headers
            .iter()
            .zip(&self.layout)
            .map(|(name, &field)| {
                let missing = self.records.iter().filter(|r| r.is_missing(field)).count();
                (name.clone(), missing)
            })
            .collect()
    }

    /// Number of records that repeat an earlier record.
    ///
    /// Records are compared by [`Record::dedup_key`].
    pub fn duplicate_count(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.records.len());
        self.records.iter().filter(|r| !seen.insert(r.dedup_key())).count()
    }

    /// Format used when writing parsed dates.
    pub fn date_format(&self) -> &'static str {
        let all_midnight = self
            .records
            .iter()
            .filter_map(|r| r.date.timestamp())
            .all(|ts| ts.num_seconds_from_midnight() == 0 && ts.nanosecond() == 0);
        if all_midnight { DATE_FORMAT } else { DATETIME_FORMAT }
    }

    pub(crate) fn render_record(&self, record: &Record, date_format: &str) -> Vec<String> {
        self.layout
            .iter()
            .map(|&field| record.render(field, date_format))
            .collect()
    }

    /// Describe columns and capture the first `head` rows.
    pub fn overview(&self, head: usize) -> TableOverview {
        let format = self.date_format();
        let columns = self
            .headers
            .iter()
            .zip(&self.layout)
            .map(|(name, &field)| ColumnOverview {
                name: name.clone(),
                non_null: self.records.iter().filter(|r| !r.is_missing(field)).count(),
                kind: self.column_kind(field, format),
            })
            .collect();

        let head = self
            .records
            .iter()
            .take(head)
            .map(|r| self.render_record(r, format))
            .collect();

        TableOverview {
            rows: self.row_count(),
            columns,
            head,
        }
    }

    fn column_kind(&self, field: Field, date_format: &str) -> ColumnKind {
        if field == Field::Date
            && self.records.iter().all(|r| !matches!(r.date, DateValue::Raw(_)))
            && self.records.iter().any(|r| r.date.timestamp().is_some())
        {
            return ColumnKind::Datetime;
        }
        if matches!(field, Field::Likes | Field::Retweets)
            && !self.records.is_empty()
            && self.records.iter().all(|r| {
                let count = if field == Field::Likes { &r.likes } else { &r.retweets };
                matches!(count, Count::Value(_))
            })
        {
            return ColumnKind::Integer;
        }

        let values: Vec<String> = self
            .records
            .iter()
            .filter(|r| !r.is_missing(field))
            .map(|r| r.render(field, date_format))
            .collect();
        infer_kind(&values)
    }
}

/// Infer a display kind from rendered values.
fn infer_kind(values: &[String]) -> ColumnKind {
    if values.is_empty() {
        ColumnKind::Empty
    } else if values.iter().all(|v| v.trim().parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if values.iter().all(|v| v.trim().parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    }
}

/// Bind each header to a field, requiring every known column.
fn bind_columns(headers: &[String]) -> Result<Vec<Field>> {
    let mut layout = Vec::with_capacity(headers.len());
    let mut bound = HashSet::new();
    let mut extras = 0;

    for header in headers {
        match Field::from_header(header) {
            Some(field) if bound.insert(field) => layout.push(field),
            _ => {
                layout.push(Field::Extra(extras));
                extras += 1;
            }
        }
    }

    for name in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == name) {
            return Err(TidyError::MissingColumn(name.to_string()));
        }
    }

    Ok(layout)
}

fn build_record(layout: &[Field], extra_count: usize, row: &[String]) -> Record {
    let mut record = Record {
        username: None,
        date: DateValue::Missing,
        likes: Count::Missing,
        retweets: Count::Missing,
        hashtags: None,
        message: None,
        extra: vec![None; extra_count],
    };

    for (idx, &field) in layout.iter().enumerate() {
        let value = row.get(idx).and_then(|v| cell(v));
        match field {
            Field::Username => record.username = value,
            Field::Date => record.date = DateValue::from_cell(value),
            Field::Likes => record.likes = Count::from_cell(value),
            Field::Retweets => record.retweets = Count::from_cell(value),
            Field::Hashtags => record.hashtags = value,
            Field::Message => record.message = value,
            Field::Extra(i) => record.extra[i] = value,
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    const HEADER: &[&str] = &["username", "date", "likes", "retweets", "hashtags", "message"];

    #[test]
    fn test_from_rows_binds_columns() {
        let table = Table::from_rows(
            headers(&["message", "username", "lang", "date", "likes", "retweets", "hashtags"]),
            vec![row(&["hello", "ann", "en", "2023-01-01", "3", "", "x"])],
        )
        .unwrap();

        assert_eq!(table.layout()[0], Field::Message);
        assert_eq!(table.layout()[2], Field::Extra(0));
        let record = &table.records()[0];
        assert_eq!(record.username.as_deref(), Some("ann"));
        assert_eq!(record.extra, vec![Some("en".to_string())]);
        assert_eq!(record.likes, Count::Raw("3".into()));
        assert_eq!(record.retweets, Count::Missing);
    }

    #[test]
    fn test_missing_required_column() {
        let err = Table::from_rows(headers(&["username", "date", "likes"]), vec![]).unwrap_err();
        assert!(matches!(err, TidyError::MissingColumn(ref c) if c == "retweets"));
    }

    #[test]
    fn test_long_row_rejected() {
        let err = Table::from_rows(
            headers(HEADER),
            vec![row(&["a", "", "1", "2", "", "hi", "extra"])],
        )
        .unwrap_err();
        assert!(matches!(err, TidyError::Parse { row: 0, .. }));
    }

    #[test]
    fn test_short_row_padded() {
        let table = Table::from_rows(headers(HEADER), vec![row(&["a", "2023-01-01"])]).unwrap();
        let record = &table.records()[0];
        assert_eq!(record.likes, Count::Missing);
        assert_eq!(record.message, None);
    }

    #[test]
    fn test_missing_counts_and_duplicates() {
        let table = Table::from_rows(
            headers(HEADER),
            vec![
                row(&["a", "", "", "5", "x", "hi"]),
                row(&["a", "", "", "5", "x", "hi"]),
                row(&["b", "2023-01-01", "1", "2", "", ""]),
            ],
        )
        .unwrap();

        let missing = table.missing_counts();
        assert_eq!(missing["date"], 2);
        assert_eq!(missing["likes"], 2);
        assert_eq!(missing["hashtags"], 1);
        assert_eq!(missing["username"], 0);
        assert_eq!(table.duplicate_count(), 1);
    }

    #[test]
    fn test_overview_kinds() {
        let table = Table::from_rows(
            headers(HEADER),
            vec![
                row(&["a", "2023-01-01", "1", "1.5", "", "hi"]),
                row(&["b", "bad", "2", "2", "", "there"]),
            ],
        )
        .unwrap();

        let overview = table.overview(1);
        assert_eq!(overview.rows, 2);
        assert_eq!(overview.head.len(), 1);
        let kinds: Vec<ColumnKind> = overview.columns.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Text,
                ColumnKind::Text,
                ColumnKind::Integer,
                ColumnKind::Float,
                ColumnKind::Empty,
                ColumnKind::Text,
            ]
        );
    }
}
