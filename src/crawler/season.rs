//! Season-index and season-page extraction.

use crate::crawler::PageError;
use crate::crawler::dom;
use crate::models::Season;
use scraper::{Html, Selector};
use std::sync::OnceLock;

struct Selectors {
    thumb: Selector,
    anchor: Selector,
}

impl Selectors {
    fn get() -> &'static Self {
        static INSTANCE: OnceLock<Selectors> = OnceLock::new();
        INSTANCE.get_or_init(|| Self {
            thumb: dom::parse("div.thumbRectInner"),
            anchor: dom::parse("a"),
        })
    }
}

/// One season per thumbnail on the index page. The thumbnail text is the
/// season number; the season's starting year follows from it.
pub fn parse_season_index(html: &str) -> Result<Vec<Season>, PageError> {
    let doc = Html::parse_document(html);
    let sel = Selectors::get();
    let mut seasons = Vec::new();
    for thumb in doc.select(&sel.thumb) {
        let text = dom::first_text(thumb)
            .ok_or_else(|| PageError::Structure("season thumbnail without text".to_string()))?;
        let sid: i32 = text
            .parse()
            .map_err(|_| PageError::Structure(format!("season thumbnail text {text:?}")))?;
        seasons.push(Season {
            sid,
            year: 1974 + sid,
        });
    }
    Ok(seasons)
}

/// Episode ids linked from a season page. Only strict episode links count:
/// the pages link plenty of other things, but episode URLs are exactly
/// `/Episodes/?` plus an 8-digit date.
#[must_use]
pub fn parse_season_page(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let sel = Selectors::get();
    let mut epids = Vec::new();
    for anchor in doc.select(&sel.anchor) {
        let Some(href) = dom::attr(anchor, "href") else {
            continue;
        };
        if href.starts_with("/Episodes/?") && href.len() == 19
            && let Some(epid) = dom::id_from_url(href)
        {
            epids.push(epid.to_string());
        }
    }
    epids
}
