//! Segment-page extraction: the role table, with per-performer identity
//! resolution and the dual-role exception.

use crate::crawler::PageError;
use crate::crawler::{dom, resolve};
use crate::models::{Appearance, Capacity, Character, Impression, Item, Title};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

/// Categories with no per-performer rows at all.
const PERFORMANCE_ONLY: &[&str] = &["Musical Performance", "Guest Performance"];

struct Selectors {
    role_row: Selector,
    td: Selector,
    anchor: Selector,
}

impl Selectors {
    fn get() -> &'static Self {
        static INSTANCE: OnceLock<Selectors> = OnceLock::new();
        INSTANCE.get_or_init(|| Self {
            role_row: dom::parse(".roleTable tr"),
            td: dom::parse("td"),
            anchor: dom::parse("a"),
        })
    }
}

/// Extracts everything a segment page yields, in emission order: performers,
/// their impressions/characters, their appearances, and finally the segment
/// itself. Row order is preserved; the duplicate-appearance logic depends
/// on it (first-seen role wins unless a later one is a distinct dual role).
pub fn parse_title_page(
    html: &str,
    title: &Title,
    extra_cast: &HashMap<String, crate::models::Actor>,
) -> Result<Vec<Item>, PageError> {
    if PERFORMANCE_ONLY.contains(&title.category.as_str()) {
        return Ok(vec![Item::Title(title.clone())]);
    }

    let doc = Html::parse_document(html);
    let sel = Selectors::get();

    let mut items: Vec<Item> = Vec::new();
    let mut first_by_aid: HashMap<String, Appearance> = HashMap::new();

    for row in doc.select(&sel.role_row) {
        let cells: Vec<ElementRef> = row.select(&sel.td).collect();
        if cells.is_empty() {
            continue;
        }

        let Some((actor, capacity)) = resolve_row_actor(cells[0], extra_cast, sel, &title.tid)?
        else {
            continue;
        };

        let mut appearance = Appearance {
            aid: actor.aid.clone(),
            tid: title.tid.clone(),
            capacity,
            role: None,
            impid: None,
            charid: None,
            voice: None,
        };

        match cells.len() {
            1 => {}
            3 => parse_role_cell(cells[2], &mut appearance, sel)?,
            n => {
                return Err(PageError::Structure(format!(
                    "role row with {n} cells in {}",
                    title.tid
                )));
            }
        }

        items.push(Item::Actor(actor));

        if let Some(impid) = appearance.impid {
            items.push(Item::Impression(Impression {
                impid,
                name: appearance.role.clone().unwrap_or_default(),
                aid: appearance.aid.clone(),
            }));
        }
        if let Some(charid) = appearance.charid {
            items.push(Item::Character(Character {
                charid,
                name: appearance.role.clone().unwrap_or_default(),
                aid: appearance.aid.clone(),
            }));
        }

        match first_by_aid.get(&appearance.aid) {
            None => {
                first_by_aid.insert(appearance.aid.clone(), appearance.clone());
                items.push(Item::Appearance(appearance));
            }
            Some(first) => {
                // A performer can legitimately hold two parts in one
                // segment (a live role plus recorded voice work, say), but
                // only when both are named and the names differ.
                let dual_role = matches!(
                    (&first.role, &appearance.role),
                    (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() && a != b
                );
                if dual_role {
                    items.push(Item::Appearance(appearance));
                } else {
                    warn!(
                        tid = %title.tid,
                        aid = %appearance.aid,
                        "suppressing repeated appearance in one segment"
                    );
                }
            }
        }
    }

    items.push(Item::Title(title.clone()));
    Ok(items)
}

/// Resolves the performer in a role-table row. Linked names carry their own
/// authoritative type; unlinked names fall back to the cell-class hint and
/// the episode's extra-cast lookup. `None` for rows with no usable name.
fn resolve_row_actor(
    cell: ElementRef,
    extra_cast: &HashMap<String, crate::models::Actor>,
    sel: &Selectors,
    tid: &str,
) -> Result<Option<(crate::models::Actor, Capacity)>, PageError> {
    if let Some(anchor) = cell.select(&sel.anchor).next() {
        let href = dom::attr(anchor, "href")
            .ok_or_else(|| PageError::Structure(format!("unlinked anchor in {tid}")))?;
        let name = dom::text_of(anchor);
        return Ok(Some((resolve::actor_from_link(href, &name)?, Capacity::Cast)));
    }

    let Some(name) = dom::first_text(cell) else {
        return Ok(None);
    };

    let capacity = dom::attr(cell, "class")
        .and_then(Capacity::from_hint)
        .unwrap_or_else(|| {
            warn!(tid, name = %name, "unrecognized performer cell hint; using unknown");
            Capacity::Unknown
        });

    let actor = if let Some(known) = extra_cast.get(&name) {
        known.clone()
    } else if name == resolve::ANNOUNCER {
        resolve::announcer()
    } else {
        warn!(tid, name = %name, "performer not in extra cast; synthesizing unknown");
        resolve::unknown_actor(&name)
    };
    Ok(Some((actor, capacity)))
}

/// The role cell: a role name, an optional ` (voice)` suffix, and an
/// optional link into the impressions or characters index.
fn parse_role_cell(
    cell: ElementRef,
    appearance: &mut Appearance,
    sel: &Selectors,
) -> Result<(), PageError> {
    let mut role = dom::text_of(cell);
    if let Some(stripped) = role.strip_suffix("(voice)") {
        role = stripped.trim_end().to_string();
        appearance.voice = Some(true);
    }
    appearance.role = Some(role);

    if let Some(link) = cell.select(&sel.anchor).next()
        && let Some(href) = dom::attr(link, "href")
    {
        let id: i32 = dom::id_from_url(href)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| PageError::UnrecognizedRoleLink(href.to_string()))?;
        if href.starts_with("/Impressions/") {
            appearance.impid = Some(id);
        } else if href.starts_with("/Characters/") {
            appearance.charid = Some(id);
        } else {
            return Err(PageError::UnrecognizedRoleLink(href.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Actor, ActorType};

    fn stub(category: &str) -> Title {
        Title {
            tid: "2005111211".into(),
            epid: "20051112".into(),
            category: category.into(),
            name: Some("Mr. Singer Family Theater".into()),
            skid: None,
            order: 10,
        }
    }

    fn appearances(items: &[Item]) -> Vec<&Appearance> {
        items
            .iter()
            .filter_map(|i| match i {
                Item::Appearance(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn performance_only_categories_emit_the_title_alone() {
        let items =
            parse_title_page("<html></html>", &stub("Musical Performance"), &HashMap::new())
                .unwrap();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Item::Title(_)));
    }

    #[test]
    fn distinct_dual_roles_keep_both_appearances() {
        let html = r#"
        <table class="roleTable">
          <tr><td><a href="/Cast/?ChPa">Chris Parnell</a></td>
              <td> ... </td><td>Mr. Singer</td></tr>
          <tr><td><a href="/Cast/?ChPa">Chris Parnell</a></td>
              <td> ... </td><td>narrator (voice)</td></tr>
        </table>
        "#;
        let items = parse_title_page(html, &stub("Sketch"), &HashMap::new()).unwrap();
        let apps = appearances(&items);
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].role.as_deref(), Some("Mr. Singer"));
        assert_eq!(apps[0].voice, None);
        assert_eq!(apps[1].role.as_deref(), Some("narrator"));
        assert_eq!(apps[1].voice, Some(true));
    }

    #[test]
    fn identical_repeated_roles_are_suppressed() {
        let html = r#"
        <table class="roleTable">
          <tr><td><a href="/Cast/?ChPa">Chris Parnell</a></td>
              <td> ... </td><td>Announcer</td></tr>
          <tr><td><a href="/Cast/?ChPa">Chris Parnell</a></td>
              <td> ... </td><td>Announcer</td></tr>
        </table>
        "#;
        let items = parse_title_page(html, &stub("Sketch"), &HashMap::new()).unwrap();
        assert_eq!(appearances(&items).len(), 1);
    }

    #[test]
    fn role_links_become_impressions_and_characters() {
        let html = r#"
        <table class="roleTable">
          <tr><td><a href="/Cast/?DaCa">Dana Carvey</a></td>
              <td> ... </td><td><a href="/Impressions/?329">George Bush</a></td></tr>
          <tr><td><a href="/Cast/?DaCa">Dana Carvey</a></td>
              <td> ... </td><td><a href="/Characters/?12">Garth</a></td></tr>
        </table>
        "#;
        let items = parse_title_page(html, &stub("Sketch"), &HashMap::new()).unwrap();
        let impression = items
            .iter()
            .find_map(|i| match i {
                Item::Impression(x) => Some(x),
                _ => None,
            })
            .unwrap();
        assert_eq!(impression.impid, 329);
        assert_eq!(impression.name, "George Bush");
        let character = items
            .iter()
            .find_map(|i| match i {
                Item::Character(x) => Some(x),
                _ => None,
            })
            .unwrap();
        assert_eq!(character.charid, 12);
        let apps = appearances(&items);
        assert_eq!(apps[0].impid, Some(329));
        assert_eq!(apps[1].charid, Some(12));
    }

    #[test]
    fn unlinked_names_resolve_through_the_extra_cast() {
        let mut extra = HashMap::new();
        extra.insert(
            "Sarah Silverman".to_string(),
            Actor {
                aid: "Sarah Silverman".into(),
                url: Some("/Guests/?3412".into()),
                actor_type: ActorType::Guest,
            },
        );
        let html = r#"
        <table class="roleTable">
          <tr><td class="host">Sarah Silverman</td><td> ... </td><td>herself</td></tr>
          <tr><td class="cameo">Somebody Unlisted</td><td> ... </td><td>cop</td></tr>
        </table>
        "#;
        let items = parse_title_page(html, &stub("Sketch"), &extra).unwrap();
        let apps = appearances(&items);
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].aid, "Sarah Silverman");
        assert_eq!(apps[0].capacity, Capacity::Host);

        // The miss synthesized an unknown actor rather than aborting.
        let synthesized = items
            .iter()
            .find_map(|i| match i {
                Item::Actor(a) if a.aid == "Somebody Unlisted" => Some(a),
                _ => None,
            })
            .unwrap();
        assert_eq!(synthesized.actor_type, ActorType::Unknown);
        assert_eq!(apps[1].capacity, Capacity::Cameo);
    }

    #[test]
    fn the_announcer_resolves_without_a_lookup_entry() {
        let html = r#"
        <table class="roleTable">
          <tr><td class="other">Don Pardo</td><td> ... </td><td>announcer (voice)</td></tr>
        </table>
        "#;
        let items = parse_title_page(html, &stub("Sketch"), &HashMap::new()).unwrap();
        let actor = items
            .iter()
            .find_map(|i| match i {
                Item::Actor(a) => Some(a),
                _ => None,
            })
            .unwrap();
        assert_eq!(actor.aid, "Don Pardo");
        assert_eq!(actor.actor_type, ActorType::Crew);
        let apps = appearances(&items);
        assert_eq!(apps[0].voice, Some(true));
    }

    #[test]
    fn unknown_role_link_prefixes_are_fatal() {
        let html = r#"
        <table class="roleTable">
          <tr><td><a href="/Cast/?DaCa">Dana Carvey</a></td>
              <td> ... </td><td><a href="/Voices/?3">???</a></td></tr>
        </table>
        "#;
        let err = parse_title_page(html, &stub("Sketch"), &HashMap::new()).unwrap_err();
        assert!(matches!(err, PageError::UnrecognizedRoleLink(_)));
    }
}
