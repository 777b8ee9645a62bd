//! Small helpers over `scraper` for the selector patterns the parsers share.

use scraper::{ElementRef, Selector};

/// Parses a selector defined in code. Only ever called on literals, so a
/// parse failure is a programming error.
#[must_use]
pub fn parse(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector defined in code")
}

/// All descendant text, concatenated and trimmed. Segment names can span
/// several text nodes, so single-node extraction is not enough.
#[must_use]
pub fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// The first non-blank text node, trimmed.
#[must_use]
pub fn first_text(el: ElementRef) -> Option<String> {
    el.text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(ToString::to_string)
}

#[must_use]
pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// The archive's page URLs carry the object id after the final `?`.
#[must_use]
pub fn id_from_url(url: &str) -> Option<&str> {
    url.rfind('?').map(|i| &url[i + 1..]).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn text_concatenates_across_nodes() {
        let html = Html::parse_fragment("<p>The <a href='/x'>Falconer</a> Returns</p>");
        let sel = parse("p");
        let p = html.select(&sel).next().unwrap();
        assert_eq!(text_of(p), "The Falconer Returns");
    }

    #[test]
    fn ids_come_after_the_last_question_mark() {
        assert_eq!(id_from_url("/Episodes/?20020518"), Some("20020518"));
        assert_eq!(id_from_url("/Cast/?DaAy"), Some("DaAy"));
        assert_eq!(id_from_url("/Seasons/"), None);
    }
}
