//! Filter predicate evaluation
//!
//! A record passes when it satisfies the search, status and signup-date
//! criteria of a [`FilterSpec`] together.

use crate::models::{FilterSpec, UserRecord};

/// Whether `user` passes every criterion of `filter`
pub fn matches(user: &UserRecord, filter: &FilterSpec) -> bool {
    matches_search(user, &filter.search_term)
        && filter.status.admits(user.status)
        && matches_date_range(user, filter)
}

/// Case-insensitive substring match on name or email
pub fn matches_search(user: &UserRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
}

/// Both bounds inclusive, compared as calendar dates
fn matches_date_range(user: &UserRecord, filter: &FilterSpec) -> bool {
    let after_start = filter.date_from.map_or(true, |from| user.signup_date >= from);
    let before_end = filter.date_to.map_or(true, |to| user.signup_date <= to);
    after_start && before_end
}

/// Narrow `users` to the records passing `filter`, preserving their order
pub fn apply_filter(users: &[UserRecord], filter: &FilterSpec) -> Vec<UserRecord> {
    users
        .iter()
        .filter(|user| matches(user, filter))
        .cloned()
        .collect()
}
