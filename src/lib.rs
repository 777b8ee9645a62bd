pub mod cli;
pub mod clients;
pub mod config;
pub mod crawler;
pub mod db;
pub mod enrich;
pub mod entities;
pub mod export;
pub mod gender;
pub mod ids;
pub mod models;
pub mod pipeline;

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use clap::{CommandFactory, Parser};
pub use config::Config;

use clients::{Fetch, PoliteClient};
use crawler::{Crawler, PageVisit, RatingsSource, TargetSet};
use db::Store;
use enrich::EnrichmentService;
use gender::GenderResolver;
use pipeline::{DedupeFilter, Pipeline};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let fmt_layer = tracing_subscriber::fmt::layer();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let args = cli::Cli::parse();
    match args.command {
        None => {
            cli::Cli::command().print_help()?;
            Ok(())
        }

        Some(cli::Commands::Init) => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("Config file already exists.");
            }
            Ok(())
        }

        Some(cli::Commands::Crawl { targets, ratings }) => {
            cmd_crawl(&config, targets, ratings).await
        }

        Some(cli::Commands::Cast) => cmd_cast(&config).await,

        Some(cli::Commands::Enrich { airtime }) => cmd_enrich(&config, airtime).await,

        Some(cli::Commands::Export { dir }) => cmd_export(&config, &dir).await,

        Some(cli::Commands::Status) => cmd_status(&config).await,
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
}

fn archive_client(config: &Config) -> anyhow::Result<PoliteClient> {
    Ok(PoliteClient::new(
        &config.archive.base_url,
        Duration::from_millis(config.archive.request_delay_ms),
        Duration::from_secs(config.archive.request_timeout_seconds),
    )?)
}

async fn cmd_crawl(
    config: &Config,
    cli_targets: Vec<String>,
    ratings_flag: bool,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    store.reset_crawl_tables().await?;

    let mut tids = config.crawl.target_tids.clone();
    tids.extend(cli_targets);
    let targets = TargetSet::from_tids(tids)?;

    let archive = archive_client(config)?;

    let with_ratings = ratings_flag || config.ratings.enabled;
    let ratings_client = if with_ratings {
        Some(PoliteClient::new(
            &config.ratings.base_url,
            Duration::from_millis(config.ratings.request_delay_ms),
            Duration::from_secs(config.ratings.request_timeout_seconds),
        )?)
    } else {
        None
    };
    let ratings_source = ratings_client.as_ref().map(|client| RatingsSource {
        fetch: client as &dyn Fetch,
        series_path: config.ratings.series_path.clone(),
    });

    let pipeline = Pipeline::new(DedupeFilter::new());
    let crawler = Crawler::new(&archive, ratings_source, targets, pipeline, &store);
    let stats = crawler.run(vec![PageVisit::SeasonIndex]).await?;

    println!();
    println!("{:-<60}", "");
    println!("Crawl complete!");
    println!("  Pages visited:    {}", stats.pages);
    println!("  Items stored:     {}", stats.items);
    println!("  Duplicates:       {}", stats.duplicates);
    println!("  Skipped specials: {}", stats.skipped_episodes);
    if stats.page_failures > 0 {
        println!("  PAGE FAILURES:    {} (see error log)", stats.page_failures);
    }
    Ok(())
}

async fn cmd_cast(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    store.reset_cast_table().await?;

    let archive = archive_client(config)?;
    let pipeline = Pipeline::new(DedupeFilter::new());
    let crawler = Crawler::new(&archive, None, TargetSet::default(), pipeline, &store);
    let stats = crawler.run(vec![PageVisit::CastIndex]).await?;

    println!();
    println!("{:-<60}", "");
    println!("Cast crawl complete!");
    println!("  Pages visited: {}", stats.pages);
    println!("  Items stored:  {}", stats.items);
    if stats.page_failures > 0 {
        println!("  PAGE FAILURES: {} (see error log)", stats.page_failures);
    }
    Ok(())
}

async fn cmd_enrich(config: &Config, airtime_flag: bool) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let male = load_name_list(config.gender.male_names_file.as_deref())?;
    let female = load_name_list(config.gender.female_names_file.as_deref())?;
    let resolver = GenderResolver::new().with_extra_names(male, female);

    let airtime = airtime_flag || config.enrich.airtime;
    EnrichmentService::new(store, resolver).run(airtime).await?;

    println!("✓ Enrichment complete.");
    Ok(())
}

fn load_name_list(path: Option<&str>) -> anyhow::Result<HashSet<String>> {
    path.map(|p| gender::names_from_file(Path::new(p)))
        .transpose()
        .map(Option::unwrap_or_default)
}

async fn cmd_export(config: &Config, dir: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    export::export_tables(&store, Path::new(dir)).await?;
    println!("✓ Tables exported to {dir}/");
    Ok(())
}

async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    println!("Table counts");
    println!("{:-<30}", "");
    for (name, count) in store.table_counts().await? {
        println!("  {name:<16} {count:>8}");
    }
    Ok(())
}
