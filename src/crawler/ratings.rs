//! Ratings-site extraction: per-episode vote histograms and demographic
//! breakdowns, joined back to the archive by (sid, epno).

use crate::crawler::PageError;
use crate::crawler::dom;
use crate::models::EpisodeRating;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::OnceLock;

struct Selectors {
    ep_anchor: Selector,
    table: Selector,
    tr: Selector,
    td: Selector,
}

impl Selectors {
    fn get() -> &'static Self {
        static INSTANCE: OnceLock<Selectors> = OnceLock::new();
        INSTANCE.get_or_init(|| Self {
            ep_anchor: dom::parse(".eplist .list_item .image a"),
            table: dom::parse(r#"table[cellpadding="0"]"#),
            tr: dom::parse("tr"),
            td: dom::parse("td"),
        })
    }
}

/// Ratings-page paths for a season's episodes, in airing order.
#[must_use]
pub fn parse_ratings_season(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let sel = Selectors::get();
    doc.select(&sel.ep_anchor)
        .filter_map(|a| dom::attr(a, "href"))
        .map(|href| {
            let path = href.split('?').next().unwrap_or(href);
            format!("{path}ratings")
        })
        .collect()
}

/// The ratings page carries two `cellpadding="0"` tables: the vote
/// distribution over scores (highest score first), then the breakdown by
/// demographic group.
pub fn parse_ratings_episode(
    html: &str,
    sid: i32,
    epno: i32,
) -> Result<EpisodeRating, PageError> {
    let doc = Html::parse_document(html);
    let sel = Selectors::get();

    let tables: Vec<ElementRef> = doc.select(&sel.table).collect();
    if tables.len() < 2 {
        return Err(PageError::Structure(
            "ratings page without both vote tables".to_string(),
        ));
    }

    let mut score_counts = BTreeMap::new();
    for (i, row) in tables[0].select(&sel.tr).enumerate() {
        if i == 0 {
            continue; // header
        }
        let score = 11 - i64::try_from(i).unwrap_or(0);
        let Ok(score) = u8::try_from(score) else {
            continue;
        };
        if !(1..=10).contains(&score) {
            continue;
        }
        if let Some(votes) = row.select(&sel.td).next().and_then(|td| int_of(td)) {
            score_counts.insert(score, votes);
        }
    }

    let mut demographic_averages = BTreeMap::new();
    let mut demographic_counts = BTreeMap::new();
    for (i, row) in tables[1].select(&sel.tr).enumerate() {
        if i == 0 {
            continue;
        }
        let cells: Vec<ElementRef> = row.select(&sel.td).collect();
        if cells.len() < 3 {
            continue;
        }
        let key = dom::text_of(cells[0]);
        if key.is_empty() {
            continue;
        }
        if let Some(count) = int_of(cells[1]) {
            demographic_counts.insert(key.clone(), count);
        }
        if let Some(avg) = float_of(cells[2]) {
            demographic_averages.insert(key, avg);
        }
    }

    Ok(EpisodeRating {
        sid,
        epno,
        score_counts,
        demographic_averages,
        demographic_counts,
    })
}

/// Vote counts arrive with separators and stray markup; keep the digits.
fn int_of(cell: ElementRef) -> Option<i64> {
    let digits: String = dom::text_of(cell)
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn float_of(cell: ElementRef) -> Option<f64> {
    let cleaned: String = dom::text_of(cell)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_listing_yields_ratings_paths() {
        let html = r#"
        <div class="eplist">
          <div class="list_item"><div class="image">
            <a href="/title/tt0694387/?ref_=ttep_ep1">E1</a>
          </div></div>
          <div class="list_item"><div class="image">
            <a href="/title/tt0694388/?ref_=ttep_ep2">E2</a>
          </div></div>
        </div>
        "#;
        assert_eq!(
            parse_ratings_season(html),
            vec!["/title/tt0694387/ratings", "/title/tt0694388/ratings"]
        );
    }

    #[test]
    fn histogram_and_demographics_are_extracted() {
        let mut rows = String::new();
        for score in (1..=10).rev() {
            rows.push_str(&format!("<tr><td>{}</td><td>{score}</td></tr>", score * 10));
        }
        let html = format!(
            r#"
            <table cellpadding="0">
              <tr><th>Votes</th><th>Rating</th></tr>
              {rows}
            </table>
            <table cellpadding="0">
              <tr><th>Demographic</th><th>Votes</th><th>Average</th></tr>
              <tr><td>Males</td><td>1,234</td><td>7.1</td></tr>
              <tr><td>Females age 45+</td><td>88</td><td>8.4</td></tr>
            </table>
            "#
        );
        let rating = parse_ratings_episode(&html, 1, 0).unwrap();
        assert_eq!(rating.sid, 1);
        assert_eq!(rating.epno, 0);
        assert_eq!(rating.score_counts.len(), 10);
        assert_eq!(rating.score_counts[&10], 100);
        assert_eq!(rating.score_counts[&1], 10);
        assert_eq!(rating.demographic_counts["Males"], 1234);
        assert!((rating.demographic_averages["Females age 45+"] - 8.4).abs() < f64::EPSILON);
    }

    #[test]
    fn a_page_missing_the_tables_is_a_failure() {
        assert!(parse_ratings_episode("<html></html>", 1, 0).is_err());
    }
}
