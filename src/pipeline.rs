//! Filter and sort pipeline for the links table.
//!
//! The displayed list is always derived from the full list, the search term
//! and the sort mode. Nothing here keeps state between calls.

use crate::api::Link;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort mode for the links table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Newest first
    #[default]
    DateDesc,
    /// Oldest first
    DateAsc,
    /// Most visited first
    ClicksDesc,
    /// Least visited first
    ClicksAsc,
    /// Key, alphabetical
    AlphaAsc,
}

impl SortMode {
    /// Cycle to the next sort mode.
    ///
    /// # Details
    /// DateDesc -> DateAsc -> ClicksDesc -> ClicksAsc -> AlphaAsc -> DateDesc
    pub fn next(self) -> Self {
        match self {
            SortMode::DateDesc => SortMode::DateAsc,
            SortMode::DateAsc => SortMode::ClicksDesc,
            SortMode::ClicksDesc => SortMode::ClicksAsc,
            SortMode::ClicksAsc => SortMode::AlphaAsc,
            SortMode::AlphaAsc => SortMode::DateDesc,
        }
    }

    /// Get sort mode as a display string.
    pub fn label(self) -> &'static str {
        match self {
            SortMode::DateDesc => "Newest first",
            SortMode::DateAsc => "Oldest first",
            SortMode::ClicksDesc => "Most clicks",
            SortMode::ClicksAsc => "Fewest clicks",
            SortMode::AlphaAsc => "Key (A-Z)",
        }
    }

    fn compare(self, a: &Link, b: &Link) -> Ordering {
        match self {
            SortMode::DateDesc => b.created_at_millis().cmp(&a.created_at_millis()),
            SortMode::DateAsc => a.created_at_millis().cmp(&b.created_at_millis()),
            SortMode::ClicksDesc => b.clicks.cmp(&a.clicks),
            SortMode::ClicksAsc => a.clicks.cmp(&b.clicks),
            SortMode::AlphaAsc => locale_compare(&a.key, &b.key),
        }
    }
}

/// Keep links whose key or target URL contains the term, ignoring case.
///
/// # Arguments
/// * `links` - Full link list
/// * `term` - Search term; empty keeps everything
///
/// # Returns
/// * `Vec<Link>` - Matching links in their original order
pub fn filter_links(links: &[Link], term: &str) -> Vec<Link> {
    let needle = term.to_lowercase();
    links
        .iter()
        .filter(|link| {
            link.key.to_lowercase().contains(&needle)
                || link.target_url.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Sort links in place by the given mode.
///
/// The sort is stable, so ties keep their incoming order.
pub fn sort_links(links: &mut [Link], mode: SortMode) {
    links.sort_by(|a, b| mode.compare(a, b));
}

/// Derive the displayed list.
///
/// # Arguments
/// * `links` - Full link list (left untouched)
/// * `term` - Search term
/// * `mode` - Sort mode
///
/// # Returns
/// * `Vec<Link>` - Filtered, sorted copy
pub fn derive_view(links: &[Link], term: &str, mode: SortMode) -> Vec<Link> {
    let mut view = filter_links(links, term);
    sort_links(&mut view, mode);
    view
}

/// Compare two strings the way a human reads them.
///
/// Case-folded first so "apple" and "Banana" order naturally; exact bytes
/// break ties so the order is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}
