//! The item stream's cleaning stages: dedupe, default-fill, validate.
//!
//! Each stage has one narrow job. Validation never drops an item; a single
//! bad field should degrade gracefully instead of losing a page's worth of
//! data.

pub mod dedupe;
pub mod defaults;
pub mod validate;

pub use dedupe::DedupeFilter;
pub use defaults::fill_defaults;
pub use validate::{Violation, validate};

use crate::models::Item;
use tracing::warn;

pub struct Pipeline {
    dedupe: DedupeFilter,
}

impl Pipeline {
    /// The dedupe cache is scoped to one crawl; the caller constructs it
    /// fresh per run and hands it in.
    #[must_use]
    pub const fn new(dedupe: DedupeFilter) -> Self {
        Self { dedupe }
    }

    /// Runs one item through all stages. `None` means the item was a
    /// duplicate and was dropped.
    pub fn process(&mut self, item: Item) -> Option<Item> {
        let item = self.dedupe.filter(item)?;
        let item = fill_defaults(item);
        for v in validate(&item) {
            warn!(kind = item.type_name(), field = v.field, "{}", v.message);
        }
        Some(item)
    }
}
