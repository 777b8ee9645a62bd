//! Static field-constraint tables for every item type, consulted by the
//! validation stage. One table per type, one generic routine over them.

use crate::models::item::Item;

/// The closed set of segment categories the archive uses.
pub const CATEGORIES: &[&str] = &[
    // one-per-episode staples
    "Cold Opening",
    "Monologue",
    "Goodnights",
    // Update and its off-brand 80s versions
    "Weekend Update",
    "Saturday Night News",
    "SNL Newsbreak",
    // live sketches, including ones framed as shows
    "Sketch",
    "Musical Sketch",
    "Show",
    "Game Show",
    "Award Show",
    // recorded segments
    "Film",
    "Commercial",
    "Cartoon",
    // performances
    "Musical Performance",
    "Guest Performance",
    // rarities
    "Miscellaneous",
    "In Memoriam",
    "Talent Entrance",
    "Intro",
    "Encore Presentation",
];

pub const ACTOR_TYPES: &[&str] = &["cast", "guest", "crew", "unknown"];

pub const CAPACITIES: &[&str] = &[
    "cast", "host", "cameo", "music", "filmed", "guest", "unknown", "other",
];

/// Scores a ratings histogram must cover, exactly.
pub const SCORE_KEYS: &[i64] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Str,
    Bool,
    /// Integer-keyed map (vote histograms).
    IntKeyMap,
    /// String-keyed map (demographic breakdowns).
    StrMap,
}

/// One field's declared constraints.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
    pub min: Option<i64>,
    pub allowed: Option<&'static [&'static str]>,
    /// When set, the field's map keys must match this set exactly.
    pub required_keys: Option<&'static [i64]>,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
            min: None,
            allowed: None,
            required_keys: None,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: true,
            min: None,
            allowed: None,
            required_keys: None,
        }
    }

    const fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    const fn with_allowed(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    const fn with_required_keys(mut self, keys: &'static [i64]) -> Self {
        self.required_keys = Some(keys);
        self
    }
}

const SEASON: &[FieldSpec] = &[
    FieldSpec::required("sid", FieldKind::Int).with_min(1),
    FieldSpec::required("year", FieldKind::Int),
];

const ACTOR: &[FieldSpec] = &[
    FieldSpec::required("aid", FieldKind::Str),
    FieldSpec::optional("url", FieldKind::Str),
    FieldSpec::required("type", FieldKind::Str).with_allowed(ACTOR_TYPES),
];

const CAST: &[FieldSpec] = &[
    FieldSpec::required("aid", FieldKind::Str),
    FieldSpec::required("sid", FieldKind::Int).with_min(1),
    FieldSpec::optional("featured", FieldKind::Bool),
    FieldSpec::optional("update_anchor", FieldKind::Bool),
    FieldSpec::optional("first_epid", FieldKind::Str),
    FieldSpec::optional("last_epid", FieldKind::Str),
];

const EPISODE: &[FieldSpec] = &[
    FieldSpec::required("epid", FieldKind::Str),
    FieldSpec::required("epno", FieldKind::Int).with_min(0),
    FieldSpec::required("sid", FieldKind::Int).with_min(1),
    FieldSpec::required("aired", FieldKind::Str),
];

const HOST: &[FieldSpec] = &[
    FieldSpec::required("epid", FieldKind::Str),
    FieldSpec::required("aid", FieldKind::Str),
];

const TITLE: &[FieldSpec] = &[
    FieldSpec::required("tid", FieldKind::Str),
    FieldSpec::required("epid", FieldKind::Str),
    FieldSpec::required("category", FieldKind::Str).with_allowed(CATEGORIES),
    FieldSpec::optional("name", FieldKind::Str),
    FieldSpec::optional("skid", FieldKind::Str),
    FieldSpec::required("order", FieldKind::Int).with_min(0),
];

const SKETCH: &[FieldSpec] = &[
    FieldSpec::required("skid", FieldKind::Str),
    FieldSpec::required("name", FieldKind::Str),
];

const APPEARANCE: &[FieldSpec] = &[
    FieldSpec::required("aid", FieldKind::Str),
    FieldSpec::required("tid", FieldKind::Str),
    FieldSpec::required("capacity", FieldKind::Str).with_allowed(CAPACITIES),
    FieldSpec::optional("role", FieldKind::Str),
    FieldSpec::optional("impid", FieldKind::Int),
    FieldSpec::optional("charid", FieldKind::Int),
    FieldSpec::optional("voice", FieldKind::Bool),
];

const CHARACTER: &[FieldSpec] = &[
    FieldSpec::required("charid", FieldKind::Int),
    FieldSpec::required("name", FieldKind::Str),
    FieldSpec::required("aid", FieldKind::Str),
];

const IMPRESSION: &[FieldSpec] = &[
    FieldSpec::required("impid", FieldKind::Int),
    FieldSpec::required("name", FieldKind::Str),
    FieldSpec::required("aid", FieldKind::Str),
];

const EPISODE_RATING: &[FieldSpec] = &[
    FieldSpec::required("sid", FieldKind::Int).with_min(1),
    FieldSpec::required("epno", FieldKind::Int).with_min(0),
    FieldSpec::required("score_counts", FieldKind::IntKeyMap).with_required_keys(SCORE_KEYS),
    FieldSpec::optional("demographic_averages", FieldKind::StrMap),
    FieldSpec::optional("demographic_counts", FieldKind::StrMap),
];

#[must_use]
pub const fn schema_for(item: &Item) -> &'static [FieldSpec] {
    match item {
        Item::Season(_) => SEASON,
        Item::Actor(_) => ACTOR,
        Item::CastMembership(_) => CAST,
        Item::Episode(_) => EPISODE,
        Item::Host(_) => HOST,
        Item::Title(_) => TITLE,
        Item::Sketch(_) => SKETCH,
        Item::Appearance(_) => APPEARANCE,
        Item::Character(_) => CHARACTER,
        Item::Impression(_) => IMPRESSION,
        Item::EpisodeRating(_) => EPISODE_RATING,
    }
}

/// A field's current value, as seen by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Unset,
    Int(i64),
    Str(String),
    Bool(bool),
    IntKeys(Vec<i64>),
    StrKeys(Vec<String>),
}

fn opt_str(v: Option<&String>) -> FieldValue {
    v.map_or(FieldValue::Unset, |s| FieldValue::Str(s.clone()))
}

fn opt_int(v: Option<i32>) -> FieldValue {
    v.map_or(FieldValue::Unset, |n| FieldValue::Int(i64::from(n)))
}

fn opt_bool(v: Option<bool>) -> FieldValue {
    v.map_or(FieldValue::Unset, FieldValue::Bool)
}

/// Current values of every declared field, in schema order.
#[must_use]
pub fn field_values(item: &Item) -> Vec<(&'static str, FieldValue)> {
    match item {
        Item::Season(s) => vec![
            ("sid", FieldValue::Int(i64::from(s.sid))),
            ("year", FieldValue::Int(i64::from(s.year))),
        ],
        Item::Actor(a) => vec![
            ("aid", FieldValue::Str(a.aid.clone())),
            ("url", opt_str(a.url.as_ref())),
            ("type", FieldValue::Str(a.actor_type.as_str().to_string())),
        ],
        Item::CastMembership(c) => vec![
            ("aid", FieldValue::Str(c.aid.clone())),
            ("sid", FieldValue::Int(i64::from(c.sid))),
            ("featured", opt_bool(c.featured)),
            ("update_anchor", opt_bool(c.update_anchor)),
            ("first_epid", opt_str(c.first_epid.as_ref())),
            ("last_epid", opt_str(c.last_epid.as_ref())),
        ],
        Item::Episode(e) => vec![
            ("epid", FieldValue::Str(e.epid.clone())),
            ("epno", FieldValue::Int(i64::from(e.epno))),
            ("sid", FieldValue::Int(i64::from(e.sid))),
            ("aired", FieldValue::Str(e.aired.clone())),
        ],
        Item::Host(h) => vec![
            ("epid", FieldValue::Str(h.epid.clone())),
            ("aid", FieldValue::Str(h.aid.clone())),
        ],
        Item::Title(t) => vec![
            ("tid", FieldValue::Str(t.tid.clone())),
            ("epid", FieldValue::Str(t.epid.clone())),
            ("category", FieldValue::Str(t.category.clone())),
            ("name", opt_str(t.name.as_ref())),
            ("skid", opt_str(t.skid.as_ref())),
            ("order", FieldValue::Int(i64::from(t.order))),
        ],
        Item::Sketch(s) => vec![
            ("skid", FieldValue::Str(s.skid.clone())),
            ("name", FieldValue::Str(s.name.clone())),
        ],
        Item::Appearance(a) => vec![
            ("aid", FieldValue::Str(a.aid.clone())),
            ("tid", FieldValue::Str(a.tid.clone())),
            ("capacity", FieldValue::Str(a.capacity.as_str().to_string())),
            ("role", opt_str(a.role.as_ref())),
            ("impid", opt_int(a.impid)),
            ("charid", opt_int(a.charid)),
            ("voice", opt_bool(a.voice)),
        ],
        Item::Character(c) => vec![
            ("charid", FieldValue::Int(i64::from(c.charid))),
            ("name", FieldValue::Str(c.name.clone())),
            ("aid", FieldValue::Str(c.aid.clone())),
        ],
        Item::Impression(i) => vec![
            ("impid", FieldValue::Int(i64::from(i.impid))),
            ("name", FieldValue::Str(i.name.clone())),
            ("aid", FieldValue::Str(i.aid.clone())),
        ],
        Item::EpisodeRating(r) => vec![
            ("sid", FieldValue::Int(i64::from(r.sid))),
            ("epno", FieldValue::Int(i64::from(r.epno))),
            (
                "score_counts",
                FieldValue::IntKeys(r.score_counts.keys().map(|k| i64::from(*k)).collect()),
            ),
            (
                "demographic_averages",
                FieldValue::StrKeys(r.demographic_averages.keys().cloned().collect()),
            ),
            (
                "demographic_counts",
                FieldValue::StrKeys(r.demographic_counts.keys().cloned().collect()),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::{Season, Title};

    #[test]
    fn schema_and_values_agree_on_field_order() {
        let item = Item::Title(Title {
            tid: "2002051810".into(),
            epid: "20020518".into(),
            category: "Sketch".into(),
            name: Some("Lovers".into()),
            skid: None,
            order: 9,
        });
        let schema = schema_for(&item);
        let values = field_values(&item);
        assert_eq!(schema.len(), values.len());
        for (spec, (name, _)) in schema.iter().zip(&values) {
            assert_eq!(spec.name, *name);
        }
    }

    #[test]
    fn season_schema_declares_a_minimum_sid() {
        let item = Item::Season(Season { sid: 1, year: 1975 });
        let sid = schema_for(&item).iter().find(|f| f.name == "sid").unwrap();
        assert_eq!(sid.min, Some(1));
        assert!(!sid.optional);
    }
}
