//! Fills declared default values into fields the extractor left unset.

use crate::models::Item;

/// Substitutes defaults for unset optional fields. Idempotent; fields
/// without a declared default are left alone.
#[must_use]
pub fn fill_defaults(mut item: Item) -> Item {
    match &mut item {
        Item::CastMembership(c) => {
            c.featured.get_or_insert(false);
            c.update_anchor.get_or_insert(false);
        }
        Item::Appearance(a) => {
            a.voice.get_or_insert(false);
        }
        _ => {}
    }
    item
}
