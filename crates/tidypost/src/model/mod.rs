//! Typed table model for post datasets.

mod record;
mod table;

pub use record::{cell, is_missing_token, Count, DateValue, Field, Record, RecordKey, REQUIRED_COLUMNS};
pub use table::{ColumnKind, ColumnOverview, Table, TableOverview, DATETIME_FORMAT, DATE_FORMAT};
