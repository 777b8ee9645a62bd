//! Cast-member pages: one membership record per season popup.

use crate::crawler::PageError;
use crate::crawler::{dom, resolve};
use crate::ids;
use crate::models::CastMembership;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::warn;

struct Selectors {
    list_anchor: Selector,
    p: Selector,
    anchor: Selector,
    head_title: Selector,
}

impl Selectors {
    fn get() -> &'static Self {
        static INSTANCE: OnceLock<Selectors> = OnceLock::new();
        INSTANCE.get_or_init(|| Self {
            list_anchor: dom::parse("div.contentFullList a"),
            p: dom::parse("p"),
            anchor: dom::parse("a"),
            head_title: dom::parse("head title"),
        })
    }
}

/// Member-page paths from the full cast listing.
#[must_use]
pub fn parse_cast_index(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let sel = Selectors::get();
    doc.select(&sel.list_anchor)
        .filter_map(|a| dom::attr(a, "href"))
        .map(ToString::to_string)
        .collect()
}

/// One membership per `#popup_N` season block. The popup sequence continues
/// with characters and impressions after the seasons run out; the first
/// popup whose opening paragraph has no season link ends the scan.
pub fn parse_cast_member(html: &str) -> Result<Vec<CastMembership>, PageError> {
    let doc = Html::parse_document(html);
    let sel = Selectors::get();

    let title_text = doc
        .select(&sel.head_title)
        .next()
        .map(dom::text_of)
        .ok_or_else(|| PageError::Structure("cast page without a head title".to_string()))?;
    let aid = resolve::asciify(title_text.rsplit('|').next().unwrap_or("").trim());
    if aid.is_empty() {
        return Err(PageError::Structure(format!(
            "no cast member name in page title {title_text:?}"
        )));
    }

    let mut memberships = Vec::new();
    for idx in 1.. {
        let popup_sel = dom::parse(&format!("#popup_{idx}"));
        let Some(popup) = doc.select(&popup_sel).next() else {
            break;
        };

        let mut paragraphs = popup.select(&sel.p);
        let season_href = paragraphs
            .next()
            .and_then(|p| p.select(&sel.anchor).next())
            .and_then(|a| dom::attr(a, "href"));
        let Some(href) = season_href.filter(|h| h.starts_with("/Seasons")) else {
            break;
        };
        let year: i32 = dom::id_from_url(href)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| PageError::Structure(format!("season link {href:?}")))?;

        let mut membership = CastMembership {
            aid: aid.clone(),
            sid: ids::sid_of_year(year),
            featured: None,
            update_anchor: None,
            first_epid: None,
            last_epid: None,
        };

        for p in paragraphs {
            let Some(text) = dom::first_text(p) else {
                continue;
            };
            if text.starts_with("Featured Player") {
                membership.featured = Some(true);
            } else if text == "Update" {
                membership.update_anchor = Some(true);
            } else if text.contains("episode") {
                let epid = p
                    .select(&sel.anchor)
                    .next()
                    .and_then(|a| dom::attr(a, "href"))
                    .and_then(dom::id_from_url)
                    .map(ToString::to_string);
                if text.starts_with("First episode") && epid.is_some() {
                    membership.first_epid = epid;
                } else if text.starts_with("Last episode") && epid.is_some() {
                    membership.last_epid = epid;
                } else {
                    warn!(aid = %aid, text = %text, "unrecognized membership episode text");
                }
            } else {
                warn!(aid = %aid, text = %text, "unrecognized cast page text");
            }
        }
        memberships.push(membership);
    }
    Ok(memberships)
}
