//! Summary statistics over cleaned post tables.

mod analyzer;

pub use analyzer::{
    average_engagement, hashtag_set, split_hashtags, top_users, unique_hashtags, AnalysisSummary,
    Analyzer, Engagement, UserCount, DEFAULT_TOP_USERS,
};
