//! Pure filtering and aggregation over rows already fetched from the store.
//!
//! Nothing in here touches the database or the clock; callers pass the
//! evaluation time and the user explicitly.

pub mod activity;
pub mod eligibility;
pub mod grouping;
pub mod stats;

/// Upper bound on matches offered for prediction in a single call.
pub const MAX_ELIGIBLE_MATCHES: usize = 20;
/// Default length of the recent activity feed.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;
/// Longest activity feed a caller may ask for.
pub const MAX_ACTIVITY_LIMIT: usize = 50;
