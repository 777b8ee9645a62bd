//! Optional airtime normalization: how much of an episode each segment,
//! and each performer within it, accounts for.

use crate::db::Store;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use tracing::warn;

const WEEKEND_UPDATE_CATEGORIES: &[&str] =
    &["Weekend Update", "Saturday Night News", "SNL Newsbreak"];

const LIVE_SKETCH_CATEGORIES: &[&str] =
    &["Sketch", "Musical Sketch", "Show", "Game Show", "Award Show"];

const RECORDED_SKETCH_CATEGORIES: &[&str] = &["Film", "Commercial"];

/// Miscellaneous segments are overwhelmingly ordinary bits, so they count.
const MISC_PERFORMER_CATEGORIES: &[&str] = &["Cold Opening", "Monologue", "Miscellaneous"];

/// Categories that count toward airtime. The notable omissions are
/// Goodnights and Musical Performance.
#[must_use]
pub fn is_performer_category(category: &str) -> bool {
    WEEKEND_UPDATE_CATEGORIES.contains(&category)
        || LIVE_SKETCH_CATEGORIES.contains(&category)
        || RECORDED_SKETCH_CATEGORIES.contains(&category)
        || MISC_PERFORMER_CATEGORIES.contains(&category)
}

/// For each episode: each qualifying segment gets `episode_share = 1/n`,
/// and `cast_episode_share` divides that again by the segment's distinct
/// performer count.
pub async fn add_airtime_columns(store: &Store) -> Result<()> {
    let titles = store.list_titles().await?;
    let appearances = store.list_appearances().await?;

    let mut performers_by_tid: HashMap<&str, HashSet<&str>> = HashMap::new();
    for app in &appearances {
        performers_by_tid
            .entry(app.tid.as_str())
            .or_default()
            .insert(app.aid.as_str());
    }

    for episode in store.list_episodes().await? {
        let qualifying: Vec<_> = titles
            .iter()
            .filter(|t| t.epid == episode.epid && is_performer_category(&t.category))
            .collect();
        if qualifying.is_empty() {
            warn!(epid = %episode.epid, "no qualifying titles for airtime; skipping episode");
            continue;
        }

        let episode_share = 1.0 / qualifying.len() as f64;
        for title in qualifying {
            let n_performers = performers_by_tid
                .get(title.tid.as_str())
                .map_or(0, HashSet::len);
            let cast_episode_share = if n_performers > 0 {
                episode_share / n_performers as f64
            } else {
                0.0
            };
            let n_performers = i32::try_from(n_performers).unwrap_or(i32::MAX);
            store
                .set_title_airtime(&title.tid, episode_share, n_performers, cast_episode_share)
                .await?;
        }
    }
    Ok(())
}
