//! Typed post records and their field values.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Columns every input dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "username", "date", "likes", "retweets", "hashtags", "message",
];

/// Tokens read as an absent value, matched exactly (case-sensitive).
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Check if a raw cell represents a missing value.
///
/// The value is not trimmed first: a whitespace-only message is text, not absent.
/// Only the exact spellings in the token list match, so `"NONE"` is a value.
pub fn is_missing_token(value: &str) -> bool {
    value.is_empty() || MISSING_TOKENS.contains(&value)
}

/// Convert a raw cell into an optional value.
pub fn cell(value: &str) -> Option<String> {
    if is_missing_token(value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// The record field a column is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Username,
    Date,
    Likes,
    Retweets,
    Hashtags,
    Message,
    /// Pass-through column, by position among the extra columns.
    Extra(usize),
}

impl Field {
    /// Bind a header name to one of the known fields.
    pub fn from_header(name: &str) -> Option<Self> {
        match name {
            "username" => Some(Field::Username),
            "date" => Some(Field::Date),
            "likes" => Some(Field::Likes),
            "retweets" => Some(Field::Retweets),
            "hashtags" => Some(Field::Hashtags),
            "message" => Some(Field::Message),
            _ => None,
        }
    }

    /// Canonical column name, `None` for pass-through columns.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Field::Username => Some("username"),
            Field::Date => Some("date"),
            Field::Likes => Some("likes"),
            Field::Retweets => Some("retweets"),
            Field::Hashtags => Some("hashtags"),
            Field::Message => Some("message"),
            Field::Extra(_) => None,
        }
    }
}

/// A non-negative engagement count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Count {
    /// No value in the source.
    Missing,
    /// Text read from the source, not yet coerced.
    Raw(String),
    /// Coerced count.
    Value(u64),
}

impl Count {
    pub fn from_cell(value: Option<String>) -> Self {
        match value {
            Some(v) => Count::Raw(v),
            None => Count::Missing,
        }
    }

    /// The coerced value, if this count has been coerced.
    pub fn value(&self) -> Option<u64> {
        match self {
            Count::Value(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Count::Missing)
    }

    fn render(&self) -> String {
        match self {
            Count::Missing => String::new(),
            Count::Raw(s) => s.clone(),
            Count::Value(n) => n.to_string(),
        }
    }
}

/// A post timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateValue {
    /// No value in the source.
    Missing,
    /// Text read from the source, not yet parsed.
    Raw(String),
    /// Successfully parsed timestamp.
    Parsed(NaiveDateTime),
    /// A value was present but could not be parsed.
    Invalid,
}

impl DateValue {
    pub fn from_cell(value: Option<String>) -> Self {
        match value {
            Some(v) => DateValue::Raw(v),
            None => DateValue::Missing,
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            DateValue::Parsed(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Missing and invalid dates both count as absent in missing-value tallies.
    pub fn is_absent(&self) -> bool {
        matches!(self, DateValue::Missing | DateValue::Invalid)
    }

    fn render(&self, format: &str) -> String {
        match self {
            DateValue::Missing | DateValue::Invalid => String::new(),
            DateValue::Raw(s) => s.clone(),
            DateValue::Parsed(ts) => ts.format(format).to_string(),
        }
    }
}

/// Date as it takes part in duplicate detection.
#[derive(Debug, PartialEq, Eq, Hash)]
enum DateKey<'a> {
    /// Missing or invalid; both are written as an empty cell.
    Absent,
    Raw(&'a str),
    Parsed(NaiveDateTime),
}

/// Identity of a record for duplicate detection.
///
/// Two records with equal keys are written as identical rows.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RecordKey<'a> {
    username: Option<&'a str>,
    date: DateKey<'a>,
    likes: &'a Count,
    retweets: &'a Count,
    hashtags: Option<&'a str>,
    message: Option<&'a str>,
    extra: &'a [Option<String>],
}

/// One post.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub username: Option<String>,
    pub date: DateValue,
    pub likes: Count,
    pub retweets: Count,
    pub hashtags: Option<String>,
    pub message: Option<String>,
    /// Values of the pass-through columns, in header order.
    pub extra: Vec<Option<String>>,
}

impl Record {
    /// Check whether the given field is absent in this record.
    pub fn is_missing(&self, field: Field) -> bool {
        match field {
            Field::Username => self.username.is_none(),
            Field::Date => self.date.is_absent(),
            Field::Likes => self.likes.is_missing(),
            Field::Retweets => self.retweets.is_missing(),
            Field::Hashtags => self.hashtags.is_none(),
            Field::Message => self.message.is_none(),
            Field::Extra(i) => self.extra.get(i).is_none_or(|v| v.is_none()),
        }
    }

    /// Key used to detect duplicate records.
    ///
    /// Equal to structural equality except that an invalid date and a missing
    /// date compare equal.
    pub fn dedup_key(&self) -> RecordKey<'_> {
        let date = match &self.date {
            DateValue::Missing | DateValue::Invalid => DateKey::Absent,
            DateValue::Raw(s) => DateKey::Raw(s),
            DateValue::Parsed(ts) => DateKey::Parsed(*ts),
        };
        RecordKey {
            username: self.username.as_deref(),
            date,
            likes: &self.likes,
            retweets: &self.retweets,
            hashtags: self.hashtags.as_deref(),
            message: self.message.as_deref(),
            extra: &self.extra,
        }
    }

    /// Render a field as it is written to CSV.
    pub fn render(&self, field: Field, date_format: &str) -> String {
        match field {
            Field::Username => self.username.clone().unwrap_or_default(),
            Field::Date => self.date.render(date_format),
            Field::Likes => self.likes.render(),
            Field::Retweets => self.retweets.render(),
            Field::Hashtags => self.hashtags.clone().unwrap_or_default(),
            Field::Message => self.message.clone().unwrap_or_default(),
            Field::Extra(i) => self.extra.get(i).cloned().flatten().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing_token() {
        assert!(is_missing_token(""));
        assert!(is_missing_token("NA"));
        assert!(is_missing_token("nan"));
        assert!(is_missing_token("NaN"));
        assert!(is_missing_token("None"));
        assert!(is_missing_token("null"));
        assert!(is_missing_token("#N/A"));
        assert!(!is_missing_token("0"));
        assert!(!is_missing_token("   "));
        assert!(!is_missing_token("nana"));
    }

    #[test]
    fn test_missing_tokens_are_case_sensitive() {
        assert!(!is_missing_token("NONE"));
        assert!(!is_missing_token("Null"));
        assert!(!is_missing_token("N/a"));
        assert_eq!(cell("NONE").as_deref(), Some("NONE"));
    }

    #[test]
    fn test_field_from_header() {
        assert_eq!(Field::from_header("likes"), Some(Field::Likes));
        assert_eq!(Field::from_header("Likes"), None);
        assert_eq!(Field::Message.name(), Some("message"));
        assert_eq!(Field::Extra(0).name(), None);
    }

    #[test]
    fn test_count_render() {
        assert_eq!(Count::Value(12).render(), "12");
        assert_eq!(Count::Raw("7.0".into()).render(), "7.0");
        assert_eq!(Count::Missing.render(), "");
        assert_eq!(Count::from_cell(None), Count::Missing);
    }

    #[test]
    fn test_invalid_date_renders_empty() {
        assert_eq!(DateValue::Invalid.render("%Y-%m-%d"), "");
        assert!(DateValue::Invalid.is_absent());
        assert!(!DateValue::Raw("2023-01-01".into()).is_absent());
    }

    fn record(date: DateValue) -> Record {
        Record {
            username: Some("a".into()),
            date,
            likes: Count::Value(1),
            retweets: Count::Value(1),
            hashtags: Some(String::new()),
            message: Some("m".into()),
            extra: Vec::new(),
        }
    }

    #[test]
    fn test_dedup_key_merges_invalid_and_missing_dates() {
        let invalid = record(DateValue::Invalid);
        let missing = record(DateValue::Missing);
        assert_ne!(invalid, missing);
        assert_eq!(invalid.dedup_key(), missing.dedup_key());

        let raw = record(DateValue::Raw(String::new()));
        assert_ne!(raw.dedup_key(), missing.dedup_key());
    }
}
