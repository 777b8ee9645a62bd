//! Episode-page extraction: the metadata header, the hosts, the episode's
//! extra-cast lookup, and the segment stubs handed to the title parser.

use crate::crawler::PageError;
use crate::crawler::{dom, resolve};
use crate::ids;
use crate::models::{Actor, Episode, Season, Sketch, Title};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

const HOST_LABELS: &[&str] = &["Host:", "Hosts:"];

/// Header rows whose linked names become the episode's extra-cast lookup.
/// These people are credited here but not linkified again on segment pages.
const EXTRA_LABELS: &[&str] = &[
    "Cameo:",
    "Cameos:",
    "Special Guest:",
    "Special Guests:",
    "Musical Guest:",
    "Musical Guests:",
    "Filmed Cameo:",
    "Filmed Cameos:",
];

struct Selectors {
    guest_row: Selector,
    td: Selector,
    p: Selector,
    anchor: Selector,
    wrapper: Selector,
    title: Selector,
    title_link: Selector,
    kind: Selector,
}

impl Selectors {
    fn get() -> &'static Self {
        static INSTANCE: OnceLock<Selectors> = OnceLock::new();
        INSTANCE.get_or_init(|| Self {
            guest_row: dom::parse("table.epGuests tr"),
            td: dom::parse("td"),
            p: dom::parse("p"),
            anchor: dom::parse("a"),
            wrapper: dom::parse("div.sketchWrapper"),
            title: dom::parse(".title"),
            title_link: dom::parse(".title a"),
            kind: dom::parse(".type"),
        })
    }
}

#[derive(Debug)]
pub struct EpisodePage {
    /// `None` when the ordinal could not be parsed: the page is a special
    /// or off-season episode and the whole visit is skipped.
    pub episode: Option<Episode>,
    pub hosts: Vec<Actor>,
    /// Raw credited name -> partial actor, for resolving unlinked mentions
    /// on this episode's segment pages.
    pub extra_cast: HashMap<String, Actor>,
    pub titles: Vec<Title>,
    pub sketches: Vec<Sketch>,
}

pub fn parse_episode_page(
    html: &str,
    epid: &str,
    season: &Season,
) -> Result<EpisodePage, PageError> {
    let doc = Html::parse_document(html);
    let sel = Selectors::get();

    let mut aired: Option<String> = None;
    let mut epno: Option<i32> = None;
    let mut hosts: Vec<Actor> = Vec::new();
    let mut extra_cast: HashMap<String, Actor> = HashMap::new();

    for row in doc.select(&sel.guest_row) {
        let cells: Vec<ElementRef> = row.select(&sel.td).collect();
        if cells.len() < 2 {
            continue;
        }
        let Some(label) = dom::first_text(cells[0]) else {
            continue;
        };
        if label == "Aired:" {
            let (a, n) = parse_aired_cell(cells[1], sel);
            aired = a;
            epno = n;
        } else if HOST_LABELS.contains(&label.as_str()) {
            for (name, actor) in linked_actors(cells[1], sel)? {
                hosts.push(actor.clone());
                extra_cast.insert(name, actor);
            }
        } else if EXTRA_LABELS.contains(&label.as_str()) {
            for (name, actor) in linked_actors(cells[1], sel)? {
                extra_cast.insert(name, actor);
            }
        } else {
            debug!(epid, label = %label, "ignoring unrecognized episode header field");
        }
    }

    let episode = match (aired, epno) {
        (Some(aired), Some(epno)) => Some(Episode {
            epid: epid.to_string(),
            epno,
            sid: season.sid,
            aired,
        }),
        _ => {
            warn!(epid, "no parseable episode ordinal; skipping as a special");
            return Ok(EpisodePage {
                episode: None,
                hosts,
                extra_cast,
                titles: Vec::new(),
                sketches: Vec::new(),
            });
        }
    };

    if hosts.is_empty() {
        return Err(PageError::MissingHost {
            epid: epid.to_string(),
        });
    }

    let mut titles = Vec::new();
    let mut sketches = Vec::new();
    for (order, wrapper) in (0i32..).zip(doc.select(&sel.wrapper)) {
        let href = wrapper
            .select(&sel.anchor)
            .next()
            .and_then(|a| dom::attr(a, "href"))
            .ok_or_else(|| PageError::Structure("segment block without a link".to_string()))?;
        let tid = dom::id_from_url(href)
            .ok_or_else(|| PageError::Structure(format!("segment link {href:?}")))?
            .to_string();
        ids::epid_of_tid(&tid)?;

        let name = wrapper
            .select(&sel.title)
            .next()
            .map(dom::text_of)
            .filter(|s| !s.is_empty());
        let category = wrapper
            .select(&sel.kind)
            .next()
            .map(dom::text_of)
            .unwrap_or_default();

        let mut skid = None;
        if let Some(link) = wrapper.select(&sel.title_link).next()
            && let Some(title_url) = dom::attr(link, "href")
        {
            if title_url.starts_with("/Sketches/") {
                if let Some(id) = dom::id_from_url(title_url) {
                    skid = Some(id.to_string());
                    sketches.push(Sketch {
                        skid: id.to_string(),
                        name: name.clone().unwrap_or_default(),
                    });
                }
            } else if title_url.starts_with("/Commercials/") {
                // Commercial pages carry nothing we keep.
            } else {
                warn!(epid, url = title_url, "unrecognized segment link format");
            }
        }

        titles.push(Title {
            tid,
            epid: epid.to_string(),
            category,
            name,
            skid,
            order,
        });
    }

    Ok(EpisodePage {
        episode,
        hosts,
        extra_cast,
        titles,
        sketches,
    })
}

/// The `Aired:` value cell, e.g. `October 4, 2014 (<a>S40</a>E2 / #768)`.
/// Yields the air date and the zero-based ordinal within the season.
fn parse_aired_cell(cell: ElementRef, sel: &Selectors) -> (Option<String>, Option<i32>) {
    let scope = cell.select(&sel.p).next().unwrap_or(cell);
    let texts: Vec<&str> = scope.text().filter(|t| !t.trim().is_empty()).collect();
    let aired = texts
        .first()
        .map(|t| t.trim().trim_end_matches('(').trim_end().to_string())
        .filter(|t| !t.is_empty());
    let epno = texts.get(2).and_then(|t| parse_epno(t));
    (aired, epno)
}

/// `"E2 / #768)"` -> 1. Specials have no `E` number and yield `None`.
fn parse_epno(text: &str) -> Option<i32> {
    let first = text.trim().split_whitespace().next()?;
    let n: i32 = first.strip_prefix('E')?.parse().ok()?;
    Some(n - 1)
}

fn linked_actors(
    cell: ElementRef,
    sel: &Selectors,
) -> Result<Vec<(String, Actor)>, PageError> {
    let mut actors = Vec::new();
    for anchor in cell.select(&sel.anchor) {
        let Some(href) = dom::attr(anchor, "href") else {
            continue;
        };
        let name = dom::text_of(anchor);
        let actor = resolve::actor_from_link(href, &name)?;
        actors.push((name, actor));
    }
    Ok(actors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActorType;

    const SEASON_40: Season = Season {
        sid: 40,
        year: 2014,
    };

    fn page() -> &'static str {
        r#"
        <table class="epGuests">
          <tr><td><p>Aired:</p></td>
              <td><p>October 4, 2014 (<a href="/Seasons/?2014">S40</a>E2 / #768)</p></td></tr>
          <tr><td><p>Host:</p></td>
              <td><p><a href="/Guests/?3412">Sarah Silverman</a></p></td></tr>
          <tr><td><p>Cameos:</p></td>
              <td><p><a href="/Guests/?1981">Maya Rudolph</a></p></td></tr>
          <tr><td><p>Broadcast:</p></td>
              <td><p>NBC</p></td></tr>
        </table>
        <div class="sketchWrapper">
          <a href="/Episodes/?201410041">0:00</a>
          <span class="title"></span>
          <span class="type">Cold Opening</span>
        </div>
        <div class="sketchWrapper">
          <a href="/Episodes/?201410042">0:12</a>
          <span class="title"><a href="/Sketches/?500">Fault in Our Stars</a></span>
          <span class="type">Sketch</span>
        </div>
        "#
    }

    #[test]
    fn header_and_segments_are_extracted() {
        let page = parse_episode_page(page(), "20141004", &SEASON_40).unwrap();
        let episode = page.episode.unwrap();
        assert_eq!(episode.epid, "20141004");
        assert_eq!(episode.epno, 1);
        assert_eq!(episode.sid, 40);
        assert_eq!(episode.aired, "October 4, 2014");

        assert_eq!(page.hosts.len(), 1);
        assert_eq!(page.hosts[0].aid, "Sarah Silverman");
        assert_eq!(page.hosts[0].actor_type, ActorType::Guest);

        // Hosts and cameos both land in the extra-cast lookup.
        assert!(page.extra_cast.contains_key("Sarah Silverman"));
        assert!(page.extra_cast.contains_key("Maya Rudolph"));

        assert_eq!(page.titles.len(), 2);
        assert_eq!(page.titles[0].tid, "201410041");
        assert_eq!(page.titles[0].category, "Cold Opening");
        assert_eq!(page.titles[0].order, 0);
        assert_eq!(page.titles[1].name.as_deref(), Some("Fault in Our Stars"));
        assert_eq!(page.titles[1].skid.as_deref(), Some("500"));
        assert_eq!(page.titles[1].order, 1);

        assert_eq!(page.sketches.len(), 1);
        assert_eq!(page.sketches[0].skid, "500");
    }

    #[test]
    fn specials_without_an_ordinal_are_skipped() {
        let html = r#"
        <table class="epGuests">
          <tr><td><p>Aired:</p></td><td><p>February 15, 2015 (40th Anniversary)</p></td></tr>
          <tr><td><p>Host:</p></td><td><p><a href="/Guests/?1">Steve Martin</a></p></td></tr>
        </table>
        <div class="sketchWrapper">
          <a href="/Episodes/?201502151">0:00</a>
          <span class="type">Sketch</span>
        </div>
        "#;
        let page = parse_episode_page(html, "20150215", &SEASON_40).unwrap();
        assert!(page.episode.is_none());
        assert!(page.titles.is_empty());
    }

    #[test]
    fn a_missing_host_is_a_page_failure() {
        let html = r#"
        <table class="epGuests">
          <tr><td><p>Aired:</p></td>
              <td><p>October 4, 2014 (<a href="/Seasons/?2014">S40</a>E2 / #768)</p></td></tr>
        </table>
        "#;
        let err = parse_episode_page(html, "20141004", &SEASON_40).unwrap_err();
        assert!(matches!(err, PageError::MissingHost { .. }));
    }
}
