//! Post-scrape table enrichment. Runs only over fully materialized tables;
//! every computation here needs global knowledge of the episode set before
//! any per-performer number means anything.

pub mod airtime;

use crate::db::Store;
use crate::entities::tenures;
use crate::gender::GenderResolver;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Membership windows the archive has slightly wrong; corrected before any
/// derivation, sourced from outside references.
const MEMBERSHIP_CORRECTIONS: &[(&str, i32, &str)] = &[
    // Credited for the very first episode only.
    ("George Coe", 1, "19751011"),
    ("Michael O'Donoghue", 1, "19751108"),
];

/// A season's episode boundary, kept in memory between enrichment passes.
#[derive(Debug, Clone)]
struct SeasonBounds {
    first_epid: String,
    last_epid: String,
    n_episodes: i32,
}

/// One membership's effective eligibility window.
#[derive(Debug, Clone)]
struct CastWindow {
    aid: String,
    sid: i32,
    first_epid: String,
    last_epid: String,
    n_episodes: i32,
}

pub struct EnrichmentService {
    store: Store,
    resolver: GenderResolver,
}

impl EnrichmentService {
    #[must_use]
    pub const fn new(store: Store, resolver: GenderResolver) -> Self {
        Self { store, resolver }
    }

    pub async fn run(&self, airtime: bool) -> Result<()> {
        self.apply_corrections().await?;
        self.add_join_columns().await?;
        let bounds = self.enrich_seasons().await?;
        let windows = self.enrich_casts(&bounds).await?;
        if airtime {
            airtime::add_airtime_columns(&self.store).await?;
        }
        self.build_tenure(&windows).await?;
        self.infer_gender().await?;
        info!("enrichment finished");
        Ok(())
    }

    async fn apply_corrections(&self) -> Result<()> {
        for (aid, sid, last_epid) in MEMBERSHIP_CORRECTIONS {
            self.store.set_cast_last_epid(aid, *sid, last_epid).await?;
        }
        Ok(())
    }

    /// Adds `sid` to titles and `epid`/`sid` to appearances by joining
    /// through titles -> episodes.
    async fn add_join_columns(&self) -> Result<()> {
        let episodes = self.store.list_episodes().await?;
        let sid_by_epid: HashMap<&str, i32> =
            episodes.iter().map(|e| (e.epid.as_str(), e.sid)).collect();

        let titles = self.store.list_titles().await?;
        let epid_by_tid: HashMap<&str, &str> = titles
            .iter()
            .map(|t| (t.tid.as_str(), t.epid.as_str()))
            .collect();

        for title in &titles {
            if let Some(sid) = sid_by_epid.get(title.epid.as_str()) {
                self.store.set_title_sid(&title.tid, *sid).await?;
            } else {
                warn!(tid = %title.tid, epid = %title.epid, "title references an unknown episode");
            }
        }

        for app in self.store.list_appearances().await? {
            let Some(epid) = epid_by_tid.get(app.tid.as_str()) else {
                warn!(tid = %app.tid, "appearance references an unknown title");
                continue;
            };
            let Some(sid) = sid_by_epid.get(epid) else {
                warn!(epid = %epid, "appearance references an unknown episode");
                continue;
            };
            self.store.set_appearance_join(app.id, epid, *sid).await?;
        }
        Ok(())
    }

    /// First/last/count of episodes per season. Episode ids are zero-padded
    /// date strings, so lexicographic min/max is chronological.
    async fn enrich_seasons(&self) -> Result<HashMap<i32, SeasonBounds>> {
        let episodes = self.store.list_episodes().await?;
        let mut bounds: HashMap<i32, SeasonBounds> = HashMap::new();

        for season in self.store.list_seasons().await? {
            let mut epids: Vec<&str> = episodes
                .iter()
                .filter(|e| e.sid == season.sid)
                .map(|e| e.epid.as_str())
                .collect();
            epids.sort_unstable();
            let (Some(first), Some(last)) = (epids.first(), epids.last()) else {
                warn!(sid = season.sid, "season has no episodes; skipping boundaries");
                continue;
            };
            let b = SeasonBounds {
                first_epid: (*first).to_string(),
                last_epid: (*last).to_string(),
                n_episodes: i32::try_from(epids.len()).unwrap_or(i32::MAX),
            };
            self.store
                .set_season_boundaries(season.sid, &b.first_epid, &b.last_epid, b.n_episodes)
                .await?;
            bounds.insert(season.sid, b);
        }
        Ok(bounds)
    }

    /// Per-membership eligible-episode counts. The window is the record's
    /// own first/last when present, otherwise the season boundary; the
    /// count runs over all episodes in the window, date-ordered by id.
    async fn enrich_casts(
        &self,
        bounds: &HashMap<i32, SeasonBounds>,
    ) -> Result<Vec<CastWindow>> {
        let episodes = self.store.list_episodes().await?;
        let mut windows = Vec::new();

        for cast in self.store.list_casts().await? {
            let Some(season) = bounds.get(&cast.sid) else {
                warn!(aid = %cast.aid, sid = cast.sid, "membership in a season without episodes");
                continue;
            };
            let first = cast
                .first_epid
                .clone()
                .unwrap_or_else(|| season.first_epid.clone());
            let last = cast
                .last_epid
                .clone()
                .unwrap_or_else(|| season.last_epid.clone());

            let count = episodes
                .iter()
                .filter(|e| e.epid.as_str() >= first.as_str() && e.epid.as_str() <= last.as_str())
                .count();
            let count = i32::try_from(count).unwrap_or(i32::MAX);

            let fraction = if season.n_episodes > 0 {
                f64::from(count) / f64::from(season.n_episodes)
            } else {
                0.0
            };
            self.store
                .set_cast_eligibility(&cast.aid, cast.sid, count, fraction)
                .await?;
            windows.push(CastWindow {
                aid: cast.aid,
                sid: cast.sid,
                first_epid: first,
                last_epid: last,
                n_episodes: count,
            });
        }
        Ok(windows)
    }

    /// One tenure row per cast-typed performer, aggregated over possibly
    /// non-contiguous membership windows.
    async fn build_tenure(&self, windows: &[CastWindow]) -> Result<()> {
        let appearances = self.store.list_appearances().await?;
        let mut windows_by_aid: HashMap<&str, Vec<&CastWindow>> = HashMap::new();
        for w in windows {
            windows_by_aid.entry(w.aid.as_str()).or_default().push(w);
        }
        for list in windows_by_aid.values_mut() {
            list.sort_by_key(|w| w.sid);
        }

        let mut rows = Vec::new();
        for actor in self.store.list_actors().await? {
            if actor.actor_type != "cast" {
                continue;
            }
            let Some(memberships) = windows_by_aid.get(actor.aid.as_str()) else {
                warn!(
                    aid = %actor.aid,
                    "typed cast but has no season memberships; skipping tenure"
                );
                continue;
            };

            let n_episodes: i32 = memberships.iter().map(|w| w.n_episodes).sum();

            // Distinct episodes per membership window; a performer who left
            // and came back is counted per stint, not globally.
            let mut eps_present = 0i32;
            for w in memberships {
                let distinct: HashSet<&str> = appearances
                    .iter()
                    .filter(|a| a.aid == actor.aid)
                    .filter_map(|a| a.epid.as_deref())
                    .filter(|epid| {
                        *epid >= w.first_epid.as_str() && *epid <= w.last_epid.as_str()
                    })
                    .collect();
                eps_present += i32::try_from(distinct.len()).unwrap_or(i32::MAX);
            }

            rows.push(tenures::Model {
                aid: actor.aid,
                n_episodes,
                eps_present,
                n_seasons: i32::try_from(memberships.len()).unwrap_or(i32::MAX),
            });
        }
        info!(rows = rows.len(), "rebuilding tenure table");
        self.store.replace_tenures(rows).await
    }

    async fn infer_gender(&self) -> Result<()> {
        for actor in self.store.list_actors().await? {
            let label = self.resolver.genderize(&actor.aid);
            self.store
                .set_actor_gender(&actor.aid, label.as_str())
                .await?;
        }
        Ok(())
    }
}
