//! Read-only aggregations over a cleaned table.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TidyError};
use crate::model::{Count, Table};

/// Number of users reported by [`Analyzer::summarize`].
pub const DEFAULT_TOP_USERS: usize = 3;

/// A username with its post count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCount {
    pub username: String,
    pub posts: usize,
}

/// Mean likes and retweets per post.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub average_likes: f64,
    pub average_retweets: f64,
    /// Number of posts averaged over.
    pub posts: usize,
}

impl Engagement {
    /// True when there were no posts to average.
    pub fn is_empty(&self) -> bool {
        self.posts == 0
    }
}

/// All analysis results for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub top_users: Vec<UserCount>,
    pub engagement: Engagement,
    pub unique_hashtags: usize,
}

/// Count posts per user and return the `n` most active.
///
/// Ties keep the order in which users were first seen.
pub fn top_users(table: &Table, n: usize) -> Vec<UserCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for username in table.records().iter().filter_map(|r| r.username.as_deref()) {
        *counts.entry(username).or_insert(0) += 1;
    }

    // Stable sort preserves first-seen order among equal counts
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(n)
        .map(|(username, posts)| UserCount {
            username: username.to_string(),
            posts,
        })
        .collect()
}

/// Average likes and retweets across all posts.
///
/// An empty table averages to zero. Counts must already be coerced.
pub fn average_engagement(table: &Table) -> Result<Engagement> {
    let posts = table.row_count();
    if posts == 0 {
        return Ok(Engagement {
            average_likes: 0.0,
            average_retweets: 0.0,
            posts: 0,
        });
    }

    let mut likes: u128 = 0;
    let mut retweets: u128 = 0;
    for (row, record) in table.records().iter().enumerate() {
        likes += u128::from(coerced(row, "likes", &record.likes)?);
        retweets += u128::from(coerced(row, "retweets", &record.retweets)?);
    }

    Ok(Engagement {
        average_likes: likes as f64 / posts as f64,
        average_retweets: retweets as f64 / posts as f64,
        posts,
    })
}

fn coerced(row: usize, column: &str, count: &Count) -> Result<u64> {
    count.value().ok_or_else(|| {
        TidyError::field_type(row, column, "count has not been coerced to an integer")
    })
}

/// Split a hashtag field into trimmed, non-empty tags.
pub fn split_hashtags(field: &str) -> impl Iterator<Item = &str> {
    field.split(',').map(str::trim).filter(|tag| !tag.is_empty())
}

/// Distinct hashtags across all posts, in first-seen order.
///
/// Comparison is case-sensitive.
pub fn hashtag_set(table: &Table) -> IndexSet<&str> {
    table
        .records()
        .iter()
        .filter_map(|r| r.hashtags.as_deref())
        .flat_map(|tags| split_hashtags(tags))
        .collect()
}

/// Number of distinct hashtags across all posts.
pub fn unique_hashtags(table: &Table) -> usize {
    hashtag_set(table).len()
}

/// Runs all aggregations.
pub struct Analyzer {
    top_n: usize,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            top_n: DEFAULT_TOP_USERS,
        }
    }

    /// Report `top_n` users instead of the default three.
    pub fn with_top_users(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn summarize(&self, table: &Table) -> Result<AnalysisSummary> {
        Ok(AnalysisSummary {
            top_users: top_users(table, self.top_n),
            engagement: average_engagement(table)?,
            unique_hashtags: unique_hashtags(table),
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
