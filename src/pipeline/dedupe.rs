//! Primary-key dedupe over the item stream.
//!
//! Duplicates are routine, not exceptional: a recurring sketch is referenced
//! from every episode it appears in, and performers are re-extracted on every
//! segment. Drops are logged at debug only.

use crate::models::Item;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Tracks primary keys seen so far, per item type. Lives for exactly one
/// crawl: built at crawl start, discarded at crawl end.
#[derive(Debug, Default)]
pub struct DedupeFilter {
    seen: HashMap<&'static str, HashSet<String>>,
}

impl DedupeFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Passes the item through unless its primary key was already seen.
    /// Item types without a declared key are never filtered.
    pub fn filter(&mut self, item: Item) -> Option<Item> {
        let Some(key) = item.primary_key() else {
            return Some(item);
        };
        let cache = self.seen.entry(item.type_name()).or_default();
        if cache.insert(key) {
            Some(item)
        } else {
            debug!(kind = item.type_name(), "dropping duplicate item");
            None
        }
    }
}
