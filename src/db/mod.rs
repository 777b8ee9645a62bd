//! The persistence boundary: one SQLite table per entity type, fronted by
//! a `Store` facade over per-area repositories.

use crate::entities::{
    actors, appearances, casts, characters, episode_ratings, episodes, hosts, impressions,
    prelude::*, seasons, sketches, tenures, titles,
};
use crate::models::Item;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn title_repo(&self) -> repositories::title::TitleRepository {
        repositories::title::TitleRepository::new(self.conn.clone())
    }

    fn actor_repo(&self) -> repositories::actor::ActorRepository {
        repositories::actor::ActorRepository::new(self.conn.clone())
    }

    fn cast_repo(&self) -> repositories::cast::CastRepository {
        repositories::cast::CastRepository::new(self.conn.clone())
    }

    fn appearance_repo(&self) -> repositories::appearance::AppearanceRepository {
        repositories::appearance::AppearanceRepository::new(self.conn.clone())
    }

    fn rating_repo(&self) -> repositories::rating::RatingRepository {
        repositories::rating::RatingRepository::new(self.conn.clone())
    }

    fn tenure_repo(&self) -> repositories::tenure::TenureRepository {
        repositories::tenure::TenureRepository::new(self.conn.clone())
    }

    /// Persists one cleaned item into its table.
    pub async fn insert_item(&self, item: &Item) -> Result<()> {
        match item {
            Item::Season(s) => self.season_repo().insert(s).await,
            Item::Actor(a) => self.actor_repo().upsert(a).await,
            Item::CastMembership(c) => self.cast_repo().insert(c).await,
            Item::Episode(e) => self.episode_repo().insert(e).await,
            Item::Host(h) => self.episode_repo().insert_host(h).await,
            Item::Title(t) => self.title_repo().insert(t).await,
            Item::Sketch(s) => self.title_repo().insert_sketch(s).await,
            Item::Appearance(a) => self.appearance_repo().insert(a).await,
            Item::Character(c) => self.actor_repo().insert_character(c).await,
            Item::Impression(i) => self.actor_repo().insert_impression(i).await,
            Item::EpisodeRating(r) => self.rating_repo().insert(r).await,
        }
    }

    /// Empties every table a fresh archive crawl rewrites. Performers and
    /// memberships survive; they are shared with the cast crawl and merge
    /// on repeat insert.
    pub async fn reset_crawl_tables(&self) -> Result<()> {
        self.season_repo().clear().await?;
        self.episode_repo().clear().await?;
        self.title_repo().clear().await?;
        self.appearance_repo().clear().await?;
        self.actor_repo().clear_credits().await?;
        self.rating_repo().clear().await?;
        info!("crawl tables cleared");
        Ok(())
    }

    pub async fn reset_cast_table(&self) -> Result<()> {
        self.cast_repo().clear().await?;
        info!("cast table cleared");
        Ok(())
    }

    pub async fn list_seasons(&self) -> Result<Vec<seasons::Model>> {
        self.season_repo().list_all().await
    }

    pub async fn list_episodes(&self) -> Result<Vec<episodes::Model>> {
        self.episode_repo().list_all().await
    }

    pub async fn list_hosts(&self) -> Result<Vec<hosts::Model>> {
        self.episode_repo().list_hosts().await
    }

    pub async fn list_titles(&self) -> Result<Vec<titles::Model>> {
        self.title_repo().list_all().await
    }

    pub async fn list_sketches(&self) -> Result<Vec<sketches::Model>> {
        self.title_repo().list_sketches().await
    }

    pub async fn list_actors(&self) -> Result<Vec<actors::Model>> {
        self.actor_repo().list_all().await
    }

    pub async fn list_characters(&self) -> Result<Vec<characters::Model>> {
        self.actor_repo().list_characters().await
    }

    pub async fn list_impressions(&self) -> Result<Vec<impressions::Model>> {
        self.actor_repo().list_impressions().await
    }

    pub async fn list_casts(&self) -> Result<Vec<casts::Model>> {
        self.cast_repo().list_all().await
    }

    pub async fn list_appearances(&self) -> Result<Vec<appearances::Model>> {
        self.appearance_repo().list_all().await
    }

    pub async fn list_ratings(&self) -> Result<Vec<episode_ratings::Model>> {
        self.rating_repo().list_all().await
    }

    pub async fn list_tenures(&self) -> Result<Vec<tenures::Model>> {
        self.tenure_repo().list_all().await
    }

    pub async fn set_season_boundaries(
        &self,
        sid: i32,
        first_epid: &str,
        last_epid: &str,
        n_episodes: i32,
    ) -> Result<()> {
        self.season_repo()
            .set_boundaries(sid, first_epid, last_epid, n_episodes)
            .await
    }

    pub async fn set_cast_eligibility(
        &self,
        aid: &str,
        sid: i32,
        n_episodes: i32,
        season_fraction: f64,
    ) -> Result<()> {
        self.cast_repo()
            .set_eligibility(aid, sid, n_episodes, season_fraction)
            .await
    }

    pub async fn set_cast_last_epid(&self, aid: &str, sid: i32, last_epid: &str) -> Result<()> {
        self.cast_repo().set_last_epid(aid, sid, last_epid).await
    }

    pub async fn set_title_sid(&self, tid: &str, sid: i32) -> Result<()> {
        self.title_repo().set_sid(tid, sid).await
    }

    pub async fn set_title_airtime(
        &self,
        tid: &str,
        episode_share: f64,
        n_performers: i32,
        cast_episode_share: f64,
    ) -> Result<()> {
        self.title_repo()
            .set_airtime(tid, episode_share, n_performers, cast_episode_share)
            .await
    }

    pub async fn set_appearance_join(&self, id: i32, epid: &str, sid: i32) -> Result<()> {
        self.appearance_repo().set_join_columns(id, epid, sid).await
    }

    pub async fn set_actor_gender(&self, aid: &str, gender: &str) -> Result<()> {
        self.actor_repo().set_gender(aid, gender).await
    }

    pub async fn replace_tenures(&self, rows: Vec<tenures::Model>) -> Result<()> {
        self.tenure_repo().replace_all(rows).await
    }

    /// Row counts per table, for the status command.
    pub async fn table_counts(&self) -> Result<Vec<(&'static str, u64)>> {
        Ok(vec![
            ("seasons", Seasons::find().count(&self.conn).await?),
            ("episodes", Episodes::find().count(&self.conn).await?),
            ("hosts", Hosts::find().count(&self.conn).await?),
            ("titles", Titles::find().count(&self.conn).await?),
            ("sketches", Sketches::find().count(&self.conn).await?),
            ("actors", Actors::find().count(&self.conn).await?),
            ("casts", Casts::find().count(&self.conn).await?),
            ("appearances", Appearances::find().count(&self.conn).await?),
            ("characters", Characters::find().count(&self.conn).await?),
            ("impressions", Impressions::find().count(&self.conn).await?),
            (
                "episode_ratings",
                EpisodeRatings::find().count(&self.conn).await?,
            ),
            ("tenures", Tenures::find().count(&self.conn).await?),
        ])
    }
}
