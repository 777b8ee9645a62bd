//! Typed records produced by the crawler, one variant per archive entity.

use serde::Serialize;
use std::collections::BTreeMap;

/// The one category the archive assigns to each person, site-wide.
///
/// Someone who has been both crew and cast (or cast and guest) gets the
/// higher-precedence type: cast > crew > guest > unknown. Per-appearance
/// context lives in [`Capacity`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Cast,
    Guest,
    Crew,
    Unknown,
}

impl ActorType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cast => "cast",
            Self::Guest => "guest",
            Self::Crew => "crew",
            Self::Unknown => "unknown",
        }
    }

    /// Higher wins when merging repeated extractions of the same person.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Cast => 3,
            Self::Crew => 2,
            Self::Guest => 1,
            Self::Unknown => 0,
        }
    }

    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "cast" => Self::Cast,
            "guest" => Self::Guest,
            "crew" => Self::Crew,
            _ => Self::Unknown,
        }
    }
}

/// The context a performer appears in within one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    Cast,
    Host,
    Cameo,
    /// Cameo by the musical guest.
    Music,
    /// Filmed cameo.
    Filmed,
    /// "Special guest" credits.
    Guest,
    Unknown,
    /// Catch-all for odd cases.
    Other,
}

impl Capacity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cast => "cast",
            Self::Host => "host",
            Self::Cameo => "cameo",
            Self::Music => "music",
            Self::Filmed => "filmed",
            Self::Guest => "guest",
            Self::Unknown => "unknown",
            Self::Other => "other",
        }
    }

    /// Maps the role table's cell-class hint to a capacity. Unlinked
    /// performers carry their context in that class attribute.
    #[must_use]
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "cast" => Some(Self::Cast),
            "host" => Some(Self::Host),
            "cameo" => Some(Self::Cameo),
            "music" => Some(Self::Music),
            "filmed" => Some(Self::Filmed),
            "guest" => Some(Self::Guest),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Season {
    pub sid: i32,
    /// Year the season began (season 1 is 1975).
    pub year: i32,
}

/// A performer, keyed by asciified full name.
///
/// The archive's own per-person ids are unreliable as keys: guests can be
/// assigned a fresh numeric id per episode, and cast ids are occasionally
/// capitalized inconsistently. Celebrities are careful about name
/// collisions, so the full name works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub aid: String,
    /// Relative path to the person's archive page, when they have one.
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub actor_type: ActorType,
}

/// One (performer, season) membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastMembership {
    pub aid: String,
    pub sid: i32,
    pub featured: Option<bool>,
    pub update_anchor: Option<bool>,
    /// Set only for partial-season memberships.
    pub first_epid: Option<String>,
    pub last_epid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    /// 8-digit air date, as used in the archive's URLs.
    pub epid: String,
    /// Zero-based ordinal within the season. Specials have none and are
    /// never emitted.
    pub epno: i32,
    pub sid: i32,
    pub aired: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Host {
    pub epid: String,
    pub aid: String,
}

/// A segment within an episode: sketch, monologue, commercial, etc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub tid: String,
    pub epid: String,
    pub category: String,
    /// Blank for categories like Monologue, Weekend Update, Goodnights.
    pub name: Option<String>,
    /// Set when the segment links to a recurring sketch.
    pub skid: Option<String>,
    /// Position within the episode; the cold opening is 0.
    pub order: i32,
}

/// A recurring segment format with its own archive page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sketch {
    pub skid: String,
    pub name: String,
}

/// Links a performer to a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appearance {
    pub aid: String,
    pub tid: String,
    pub capacity: Capacity,
    /// Credited role name. Blank mostly in the monologue and Update,
    /// meaning they played themselves.
    pub role: Option<String>,
    pub impid: Option<i32>,
    pub charid: Option<i32>,
    /// Voice-only performance.
    pub voice: Option<bool>,
}

/// A named fictional role originated by one performer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    pub charid: i32,
    pub name: String,
    pub aid: String,
}

/// A celebrity impersonation credited to one performer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Impression {
    pub impid: i32,
    pub name: String,
    pub aid: String,
}

/// Per-episode vote histogram and demographic breakdown from the ratings
/// site, joined to episodes by (sid, epno).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeRating {
    pub sid: i32,
    pub epno: i32,
    /// Vote count for each possible score 1 through 10.
    pub score_counts: BTreeMap<u8, i64>,
    pub demographic_averages: BTreeMap<String, f64>,
    pub demographic_counts: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Season(Season),
    Actor(Actor),
    CastMembership(CastMembership),
    Episode(Episode),
    Host(Host),
    Title(Title),
    Sketch(Sketch),
    Appearance(Appearance),
    Character(Character),
    Impression(Impression),
    EpisodeRating(EpisodeRating),
}

impl Item {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Season(_) => "season",
            Self::Actor(_) => "actor",
            Self::CastMembership(_) => "cast",
            Self::Episode(_) => "episode",
            Self::Host(_) => "host",
            Self::Title(_) => "title",
            Self::Sketch(_) => "sketch",
            Self::Appearance(_) => "appearance",
            Self::Character(_) => "character",
            Self::Impression(_) => "impression",
            Self::EpisodeRating(_) => "episode_rating",
        }
    }

    /// Primary-key value for dedupable item types. Memberships, hosts,
    /// appearances and ratings have no single-field key and pass through
    /// the dedupe filter untouched.
    #[must_use]
    pub fn primary_key(&self) -> Option<String> {
        match self {
            Self::Season(s) => Some(s.sid.to_string()),
            Self::Actor(a) => Some(a.aid.clone()),
            Self::Episode(e) => Some(e.epid.clone()),
            Self::Title(t) => Some(t.tid.clone()),
            Self::Sketch(s) => Some(s.skid.clone()),
            Self::Character(c) => Some(c.charid.to_string()),
            Self::Impression(i) => Some(i.impid.to_string()),
            Self::CastMembership(_)
            | Self::Host(_)
            | Self::Appearance(_)
            | Self::EpisodeRating(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_type_precedence_orders_cast_first() {
        assert!(ActorType::Cast.precedence() > ActorType::Crew.precedence());
        assert!(ActorType::Crew.precedence() > ActorType::Guest.precedence());
        assert!(ActorType::Guest.precedence() > ActorType::Unknown.precedence());
    }

    #[test]
    fn capacity_hints_cover_the_archive_classes() {
        assert_eq!(Capacity::from_hint("host"), Some(Capacity::Host));
        assert_eq!(Capacity::from_hint("cameo"), Some(Capacity::Cameo));
        assert_eq!(Capacity::from_hint("filmed"), Some(Capacity::Filmed));
        assert_eq!(Capacity::from_hint("sketchTitle"), None);
    }

    #[test]
    fn primary_keys_only_for_keyed_types() {
        let actor = Item::Actor(Actor {
            aid: "Dan Aykroyd".into(),
            url: Some("/Cast/?DaAy".into()),
            actor_type: ActorType::Cast,
        });
        assert_eq!(actor.primary_key().as_deref(), Some("Dan Aykroyd"));

        let host = Item::Host(Host {
            epid: "19751011".into(),
            aid: "George Carlin".into(),
        });
        assert_eq!(host.primary_key(), None);
    }
}
