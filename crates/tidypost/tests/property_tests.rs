//! Property-based tests for the cleaning passes and aggregations.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p tidypost --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p tidypost --test property_tests
//! ```

use proptest::prelude::*;

use tidypost::analysis::{average_engagement, split_hashtags};
use tidypost::clean::{deduplicate, fill_missing, normalize_whitespace};
use tidypost::{Cleaner, Table};

// =============================================================================
// Test Strategies
// =============================================================================

/// Strings with plenty of mixed whitespace.
fn messy_text() -> impl Strategy<Value = String> {
    "[a-z \\t\\n\\r]{0,40}"
}

/// Cells for the count columns, including absent and float-shaped values.
fn count_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("NaN".to_string()),
        (0u32..50).prop_map(|n| n.to_string()),
        (0u32..50).prop_map(|n| format!("{}.0", n)),
    ]
}

fn date_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("not-a-date".to_string()),
        "20[0-2][0-9]-0[1-9]-[12][0-9]",
        "20[0-2][0-9]-0[1-9]-[12][0-9] [01][0-9]:[0-5][0-9]:[0-5][0-9]",
    ]
}

/// Messages whose normalized forms are all distinct, so normalization never
/// turns two different rows into duplicates after deduplication has run.
fn message_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  hi   there ".to_string()),
        Just("hello\tworld".to_string()),
        Just("\n ok \n".to_string()),
        Just("ok".to_string()),
    ]
}

/// Rows drawn from a small value space so duplicates are common.
fn row() -> impl Strategy<Value = Vec<String>> {
    (
        prop_oneof![Just("ann"), Just("bo"), Just("")],
        date_cell(),
        count_cell(),
        count_cell(),
        prop_oneof![Just(""), Just("x"), Just("x, y"), Just("a,a, b,")],
        message_cell(),
    )
        .prop_map(|(user, date, likes, retweets, tags, message)| {
            vec![
                user.to_string(),
                date,
                likes,
                retweets,
                tags.to_string(),
                message,
            ]
        })
}

fn table() -> impl Strategy<Value = Table> {
    prop::collection::vec(row(), 0..30).prop_map(|rows| {
        let headers = ["username", "date", "likes", "retweets", "hashtags", "message"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Table::from_rows(headers, rows).expect("valid rows")
    })
}

// =============================================================================
// Normalization Properties
// =============================================================================

proptest! {
    /// Normalized text has no whitespace runs and no edge whitespace.
    #[test]
    fn normalize_has_no_runs(input in messy_text()) {
        let out = normalize_whitespace(&input);
        let chars: Vec<char> = out.chars().collect();
        prop_assert!(chars.windows(2).all(|w| !(w[0].is_whitespace() && w[1].is_whitespace())));
        prop_assert_eq!(out.trim(), out.as_str());
    }

    /// Normalization is idempotent.
    #[test]
    fn normalize_is_idempotent(input in any::<String>()) {
        let once = normalize_whitespace(&input);
        prop_assert_eq!(normalize_whitespace(&once), once);
    }

    /// Split hashtags are trimmed and non-empty.
    #[test]
    fn hashtags_are_trimmed(input in "[a-c ,]{0,30}") {
        for tag in split_hashtags(&input) {
            prop_assert!(!tag.is_empty());
            prop_assert_eq!(tag.trim(), tag);
        }
    }
}

// =============================================================================
// Cleaner Properties
// =============================================================================

proptest! {
    /// After fill-missing no count, hashtag or message is absent.
    #[test]
    fn fill_missing_is_total(t in table()) {
        let (t, _) = fill_missing(t);
        for record in t.records() {
            prop_assert!(!record.likes.is_missing());
            prop_assert!(!record.retweets.is_missing());
            prop_assert!(record.hashtags.is_some());
            prop_assert!(record.message.is_some());
        }
    }

    /// Deduplication never grows the table and is idempotent.
    #[test]
    fn dedup_shrinks_and_is_idempotent(t in table()) {
        let before = t.row_count();
        let (once, _) = deduplicate(t);
        prop_assert!(once.row_count() <= before);
        prop_assert_eq!(once.duplicate_count(), 0);

        let (twice, report) = deduplicate(once.clone());
        prop_assert_eq!(report.rows_removed, 0);
        prop_assert_eq!(twice, once);
    }

    /// Cleaning an already-cleaned table changes nothing.
    #[test]
    fn clean_is_idempotent(t in table()) {
        let cleaner = Cleaner::new();
        let (once, _) = cleaner.clean(t).expect("clean");
        let (twice, _) = cleaner.clean(once.clone()).expect("clean again");
        prop_assert_eq!(twice, once);
    }

    /// Cleaned tables hold the post-cleaning invariants.
    #[test]
    fn cleaned_invariants_hold(t in table()) {
        let (t, _) = Cleaner::new().clean(t).expect("clean");
        prop_assert_eq!(t.duplicate_count(), 0);
        for record in t.records() {
            prop_assert!(record.likes.value().is_some());
            prop_assert!(record.retweets.value().is_some());
            prop_assert!(!matches!(record.date, tidypost::DateValue::Raw(_)));
            let message = record.message.as_deref().expect("message filled");
            prop_assert_eq!(normalize_whitespace(message), message);
        }
        let engagement = average_engagement(&t).expect("coerced counts");
        prop_assert!(engagement.average_likes >= 0.0);
    }
}

#[test]
fn average_of_empty_table_is_zero() {
    let headers = ["username", "date", "likes", "retweets", "hashtags", "message"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let t = Table::from_rows(headers, Vec::new()).unwrap();
    let engagement = average_engagement(&t).unwrap();
    assert_eq!(engagement.average_likes, 0.0);
    assert_eq!(engagement.average_retweets, 0.0);
}
