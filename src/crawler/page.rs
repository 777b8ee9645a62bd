//! The tagged page-visit variants the crawl queue is made of. Each variant
//! carries the context its parser needs, passed down explicitly instead of
//! living in shared crawler state.

use crate::models::{Actor, Season, Title};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-episode lookup from raw credited name to the partial actor built
/// from the episode header. Scoped to one episode's title visits; never
/// shared across episodes.
pub type ExtraCast = Arc<HashMap<String, Actor>>;

#[derive(Debug, Clone)]
pub enum PageVisit {
    /// The listing of all seasons.
    SeasonIndex,
    /// One season's episode listing.
    Season { season: Season },
    /// One episode page, visited in its season's context.
    Episode { epid: String, season: Season },
    /// One segment page, carrying the stub parsed from the episode page and
    /// the episode's extra-cast lookup.
    Title { title: Title, extra_cast: ExtraCast },
    /// The full cast-member listing.
    CastIndex,
    /// One cast member's page of per-season membership popups.
    CastMember { path: String },
    /// A season's episode listing on the ratings site.
    RatingsSeason { sid: i32 },
    /// One episode's ratings breakdown.
    RatingsEpisode { sid: i32, epno: i32, path: String },
}

impl PageVisit {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SeasonIndex => "season-index",
            Self::Season { .. } => "season",
            Self::Episode { .. } => "episode",
            Self::Title { .. } => "title",
            Self::CastIndex => "cast-index",
            Self::CastMember { .. } => "cast-member",
            Self::RatingsSeason { .. } => "ratings-season",
            Self::RatingsEpisode { .. } => "ratings-episode",
        }
    }
}
