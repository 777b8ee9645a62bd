//! The crawl state machine: an explicit queue of page visits, each carrying
//! the context its parser needs. Page-level failures abandon that page's
//! subtree and are reported separately from recoverable warnings; fetch and
//! persistence failures abort the crawl.

pub mod cast;
pub mod dom;
pub mod episode;
pub mod page;
pub mod ratings;
pub mod resolve;
pub mod season;
pub mod targets;
pub mod title;

pub use page::{ExtraCast, PageVisit};
pub use targets::TargetSet;

use crate::clients::{Fetch, FetchError};
use crate::db::Store;
use crate::ids::IdError;
use crate::models::{Host, Item};
use crate::pipeline::Pipeline;
use anyhow::Context;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// A broken page-structure assumption. Halts the page being processed (and
/// everything below it) for manual inspection, without taking down the
/// whole crawl.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Id(#[from] IdError),

    #[error("episode {epid} has no hosts")]
    MissingHost { epid: String },

    #[error("unrecognized actor link: {0}")]
    UnrecognizedActorLink(String),

    #[error("unrecognized role link: {0}")]
    UnrecognizedRoleLink(String),

    #[error("unexpected page structure: {0}")]
    Structure(String),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CrawlStats {
    pub pages: u64,
    pub items: u64,
    pub duplicates: u64,
    pub page_failures: u64,
    pub skipped_episodes: u64,
}

enum VisitError {
    Page(PageError),
    Fetch(FetchError),
    Store(anyhow::Error),
}

impl From<PageError> for VisitError {
    fn from(e: PageError) -> Self {
        Self::Page(e)
    }
}

impl From<FetchError> for VisitError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

/// The ratings site is a second origin with its own pacing.
pub struct RatingsSource<'a> {
    pub fetch: &'a dyn Fetch,
    /// Path prefix of the show on the ratings site, e.g. `/title/tt0072562`.
    pub series_path: String,
}

pub struct Crawler<'a> {
    archive: &'a dyn Fetch,
    ratings: Option<RatingsSource<'a>>,
    targets: TargetSet,
    pipeline: Pipeline,
    store: &'a Store,
    stats: CrawlStats,
}

impl<'a> Crawler<'a> {
    #[must_use]
    pub fn new(
        archive: &'a dyn Fetch,
        ratings: Option<RatingsSource<'a>>,
        targets: TargetSet,
        pipeline: Pipeline,
        store: &'a Store,
    ) -> Self {
        Self {
            archive,
            ratings,
            targets,
            pipeline,
            store,
            stats: CrawlStats::default(),
        }
    }

    /// Drains the visit queue. Visits are scheduled, not executed
    /// immediately; the fetch client enforces pacing underneath.
    pub async fn run(mut self, start: Vec<PageVisit>) -> anyhow::Result<CrawlStats> {
        let mut queue: VecDeque<PageVisit> = start.into();
        while let Some(visit) = queue.pop_front() {
            let kind = visit.kind();
            debug!(kind, "visiting page");
            match self.visit(visit, &mut queue).await {
                Ok(()) => self.stats.pages += 1,
                Err(VisitError::Page(e)) => {
                    self.stats.page_failures += 1;
                    error!(kind, error = %e, "abandoning page subtree");
                }
                Err(VisitError::Fetch(e)) => {
                    return Err(anyhow::Error::new(e)).context("page fetch failed");
                }
                Err(VisitError::Store(e)) => return Err(e.context("persisting item failed")),
            }
        }
        info!(
            pages = self.stats.pages,
            items = self.stats.items,
            duplicates = self.stats.duplicates,
            page_failures = self.stats.page_failures,
            skipped_episodes = self.stats.skipped_episodes,
            "crawl finished"
        );
        Ok(self.stats)
    }

    async fn visit(
        &mut self,
        visit: PageVisit,
        queue: &mut VecDeque<PageVisit>,
    ) -> Result<(), VisitError> {
        match visit {
            PageVisit::SeasonIndex => {
                let body = self.archive.get("/Seasons/").await?;
                for season in season::parse_season_index(&body)? {
                    if !self.targets.wants_season(season.sid) {
                        continue;
                    }
                    let sid = season.sid;
                    self.emit(vec![Item::Season(season.clone())]).await?;
                    queue.push_back(PageVisit::Season { season });
                    if self.ratings.is_some() {
                        queue.push_back(PageVisit::RatingsSeason { sid });
                    }
                }
            }

            PageVisit::Season { season } => {
                let body = self
                    .archive
                    .get(&format!("/Seasons/?{}", season.year))
                    .await?;
                for epid in season::parse_season_page(&body) {
                    if !self.targets.wants_episode(&epid) {
                        continue;
                    }
                    queue.push_back(PageVisit::Episode {
                        epid,
                        season: season.clone(),
                    });
                }
            }

            PageVisit::Episode { epid, season } => {
                let body = self.archive.get(&format!("/Episodes/?{epid}")).await?;
                let page = episode::parse_episode_page(&body, &epid, &season)?;
                let Some(ep) = page.episode else {
                    self.stats.skipped_episodes += 1;
                    return Ok(());
                };

                let mut items = vec![Item::Episode(ep)];
                for host in &page.hosts {
                    items.push(Item::Host(Host {
                        epid: epid.clone(),
                        aid: host.aid.clone(),
                    }));
                }
                items.extend(page.sketches.into_iter().map(Item::Sketch));
                self.emit(items).await?;

                let extra_cast: ExtraCast = Arc::new(page.extra_cast);
                for title in page.titles {
                    if !self.targets.wants_title(&title.tid) {
                        continue;
                    }
                    queue.push_back(PageVisit::Title {
                        title,
                        extra_cast: Arc::clone(&extra_cast),
                    });
                }
            }

            PageVisit::Title { title, extra_cast } => {
                let body = self.archive.get(&format!("/Episodes/?{}", title.tid)).await?;
                let items = title::parse_title_page(&body, &title, &extra_cast)?;
                self.emit(items).await?;
            }

            PageVisit::CastIndex => {
                let body = self.archive.get("/Cast/?FullList").await?;
                for path in cast::parse_cast_index(&body) {
                    queue.push_back(PageVisit::CastMember { path });
                }
            }

            PageVisit::CastMember { path } => {
                let body = self.archive.get(&path).await?;
                let items: Vec<Item> = cast::parse_cast_member(&body)?
                    .into_iter()
                    .map(Item::CastMembership)
                    .collect();
                self.emit(items).await?;
            }

            PageVisit::RatingsSeason { sid } => {
                let Some(source) = self.ratings.as_ref() else {
                    return Ok(());
                };
                let path = format!("{}/episodes?season={sid}", source.series_path);
                let body = source.fetch.get(&path).await?;
                for (epno, path) in (0i32..).zip(ratings::parse_ratings_season(&body)) {
                    queue.push_back(PageVisit::RatingsEpisode { sid, epno, path });
                }
            }

            PageVisit::RatingsEpisode { sid, epno, path } => {
                let Some(source) = self.ratings.as_ref() else {
                    return Ok(());
                };
                let fetch = source.fetch;
                let body = fetch.get(&path).await?;
                let rating = ratings::parse_ratings_episode(&body, sid, epno)?;
                self.emit(vec![Item::EpisodeRating(rating)]).await?;
            }
        }
        Ok(())
    }

    /// Runs items through the pipeline and persists the survivors.
    async fn emit(&mut self, items: Vec<Item>) -> Result<(), VisitError> {
        for item in items {
            if let Some(item) = self.pipeline.process(item) {
                self.store
                    .insert_item(&item)
                    .await
                    .map_err(VisitError::Store)?;
                self.stats.items += 1;
            } else {
                self.stats.duplicates += 1;
            }
        }
        Ok(())
    }
}
