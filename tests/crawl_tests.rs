//! End-to-end crawl tests over fixture pages, through the real pipeline
//! and store.

use async_trait::async_trait;
use sketcharr::clients::{Fetch, FetchError};
use sketcharr::crawler::{Crawler, PageVisit, RatingsSource, TargetSet};
use sketcharr::db::Store;
use sketcharr::pipeline::{DedupeFilter, Pipeline};
use std::collections::HashMap;

struct FakeArchive {
    pages: HashMap<String, String>,
}

impl FakeArchive {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl Fetch for FakeArchive {
    async fn get(&self, path: &str) -> Result<String, FetchError> {
        Ok(self
            .pages
            .get(path)
            .unwrap_or_else(|| panic!("unexpected fetch: {path}"))
            .clone())
    }
}

async fn temp_store() -> Store {
    let db_path = std::env::temp_dir().join(format!("sketcharr-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create test store")
}

const SEASON_INDEX: &str = r#"<div class="thumbRectInner">1</div>"#;

const SEASON_PAGE: &str = r#"
  <a href="/Episodes/?19751011">October 11, 1975</a>
  <a href="/Seasons/?1975">this season</a>
"#;

const EPISODE_PAGE: &str = r#"
  <table class="epGuests">
    <tr><td><p>Aired:</p></td>
        <td><p>October 11, 1975 (<a href="/Seasons/?1975">S1</a>E1 / #1)</p></td></tr>
    <tr><td><p>Host:</p></td>
        <td><p><a href="/Guests/?1">George Carlin</a></p></td></tr>
  </table>
  <div class="sketchWrapper">
    <a href="/Episodes/?197510111">0:00</a>
    <span class="title"></span>
    <span class="type">Cold Opening</span>
  </div>
  <div class="sketchWrapper">
    <a href="/Episodes/?1975101110">0:40</a>
    <span class="title"><a href="/Sketches/?75">Bees</a></span>
    <span class="type">Sketch</span>
  </div>
  <div class="sketchWrapper">
    <a href="/Episodes/?197510115">0:55</a>
    <span class="title"></span>
    <span class="type">Musical Performance</span>
  </div>
"#;

const COLD_OPENING_PAGE: &str = r#"
  <table class="roleTable">
    <tr><td><a href="/Cast/?ChCh">Chevy Chase</a></td><td> ... </td><td>Victim</td></tr>
    <tr><td class="host">George Carlin</td></tr>
  </table>
"#;

const BEES_PAGE: &str = r#"
  <table class="roleTable">
    <tr><td><a href="/Cast/?JoBe">John Belushi</a></td><td> ... </td><td>Bee</td></tr>
    <tr><td><a href="/Cast/?ChCh">Chevy Chase</a></td><td> ... </td><td>Announcer</td></tr>
    <tr><td><a href="/Cast/?ChCh">Chevy Chase</a></td><td> ... </td><td>Announcer</td></tr>
  </table>
"#;

const MUSICAL_PAGE: &str = "<html><body>no roles here</body></html>";

fn archive_fixture() -> FakeArchive {
    FakeArchive::new(&[
        ("/Seasons/", SEASON_INDEX),
        ("/Seasons/?1975", SEASON_PAGE),
        ("/Episodes/?19751011", EPISODE_PAGE),
        ("/Episodes/?197510111", COLD_OPENING_PAGE),
        ("/Episodes/?1975101110", BEES_PAGE),
        ("/Episodes/?197510115", MUSICAL_PAGE),
    ])
}

#[tokio::test]
async fn full_crawl_materializes_every_table() {
    let store = temp_store().await;
    let archive = archive_fixture();

    let crawler = Crawler::new(
        &archive,
        None,
        TargetSet::default(),
        Pipeline::new(DedupeFilter::new()),
        &store,
    );
    let stats = crawler.run(vec![PageVisit::SeasonIndex]).await.unwrap();

    assert_eq!(stats.pages, 6);
    assert_eq!(stats.page_failures, 0);

    let seasons = store.list_seasons().await.unwrap();
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].sid, 1);
    assert_eq!(seasons[0].year, 1975);

    let episodes = store.list_episodes().await.unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].epid, "19751011");
    assert_eq!(episodes[0].epno, 0);
    assert_eq!(episodes[0].sid, 1);
    assert_eq!(episodes[0].aired, "October 11, 1975");

    let hosts = store.list_hosts().await.unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].aid, "George Carlin");

    let titles = store.list_titles().await.unwrap();
    assert_eq!(titles.len(), 3);
    let bees = titles.iter().find(|t| t.tid == "1975101110").unwrap();
    assert_eq!(bees.category, "Sketch");
    assert_eq!(bees.skid.as_deref(), Some("75"));
    assert_eq!(bees.order, 1);

    let sketches = store.list_sketches().await.unwrap();
    assert_eq!(sketches.len(), 1);
    assert_eq!(sketches[0].skid, "75");
    assert_eq!(sketches[0].name, "Bees");

    // Chevy appears on two segment pages but is one performer.
    let actors = store.list_actors().await.unwrap();
    let chevy = actors.iter().find(|a| a.aid == "Chevy Chase").unwrap();
    assert_eq!(chevy.actor_type, "cast");
    assert_eq!(chevy.url.as_deref(), Some("/Cast/?ChCh"));
    let carlin = actors.iter().find(|a| a.aid == "George Carlin").unwrap();
    assert_eq!(carlin.actor_type, "guest");

    let appearances = store.list_appearances().await.unwrap();
    // Cold opening: Chevy + unlinked host row. Bees: Belushi + Chevy once
    // (the identical repeated role is suppressed).
    assert_eq!(appearances.len(), 4);
    let host_row = appearances
        .iter()
        .find(|a| a.aid == "George Carlin")
        .unwrap();
    assert_eq!(host_row.capacity, "host");
    assert_eq!(
        appearances
            .iter()
            .filter(|a| a.aid == "Chevy Chase" && a.tid == "1975101110")
            .count(),
        1
    );
}

#[tokio::test]
async fn targeted_crawl_prunes_everything_else() {
    let store = temp_store().await;
    // Only the pages on the target path exist; fetching anything else
    // would panic the fake.
    let archive = FakeArchive::new(&[
        ("/Seasons/", SEASON_INDEX),
        ("/Seasons/?1975", SEASON_PAGE),
        ("/Episodes/?19751011", EPISODE_PAGE),
        ("/Episodes/?1975101110", BEES_PAGE),
    ]);

    let targets = TargetSet::from_tids(["1975101110".to_string()]).unwrap();
    let crawler = Crawler::new(
        &archive,
        None,
        targets,
        Pipeline::new(DedupeFilter::new()),
        &store,
    );
    let stats = crawler.run(vec![PageVisit::SeasonIndex]).await.unwrap();
    assert_eq!(stats.pages, 4);

    let titles = store.list_titles().await.unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].tid, "1975101110");
}

#[tokio::test]
async fn cast_crawl_builds_membership_rows() {
    let store = temp_store().await;
    let archive = FakeArchive::new(&[
        (
            "/Cast/?FullList",
            r#"<div class="contentFullList"><a href="/Cast/?AlFr">Al Franken</a></div>"#,
        ),
        (
            "/Cast/?AlFr",
            r#"
            <head><title>the archives | Cast | Al Franken</title></head>
            <body>
              <div id="popup_1">
                <p><a href="/Seasons/?1977">Season 3</a></p>
                <p>Featured Player</p>
              </div>
              <div id="popup_2">
                <p><a href="/Seasons/?1985">Season 11</a></p>
              </div>
            </body>
            "#,
        ),
    ]);

    let crawler = Crawler::new(
        &archive,
        None,
        TargetSet::default(),
        Pipeline::new(DedupeFilter::new()),
        &store,
    );
    crawler.run(vec![PageVisit::CastIndex]).await.unwrap();

    let casts = store.list_casts().await.unwrap();
    assert_eq!(casts.len(), 2);
    assert_eq!(casts[0].aid, "Al Franken");
    assert_eq!(casts[0].sid, 3);
    assert!(casts[0].featured);
    assert!(!casts[0].update_anchor);
    assert_eq!(casts[1].sid, 11);
    assert!(!casts[1].featured);
}

#[tokio::test]
async fn ratings_crawl_joins_by_season_and_ordinal() {
    let store = temp_store().await;
    let archive = archive_fixture();

    let mut histogram = String::new();
    for score in (1..=10).rev() {
        histogram.push_str(&format!("<tr><td>{}</td><td>{score}</td></tr>", score * 7));
    }
    let ratings_episode = format!(
        r#"
        <table cellpadding="0"><tr><th>Votes</th></tr>{histogram}</table>
        <table cellpadding="0">
          <tr><th>Demographic</th><th>Votes</th><th>Average</th></tr>
          <tr><td>Males</td><td>500</td><td>7.9</td></tr>
        </table>
        "#
    );
    let ratings = FakeArchive::new(&[
        (
            "/title/tt0072562/episodes?season=1",
            r#"<div class="eplist"><div class="list_item"><div class="image">
               <a href="/title/tt0694387/?ref_=ttep_ep1">E1</a>
             </div></div></div>"#,
        ),
        ("/title/tt0694387/ratings", ratings_episode.as_str()),
    ]);

    let crawler = Crawler::new(
        &archive,
        Some(RatingsSource {
            fetch: &ratings,
            series_path: "/title/tt0072562".to_string(),
        }),
        TargetSet::default(),
        Pipeline::new(DedupeFilter::new()),
        &store,
    );
    crawler.run(vec![PageVisit::SeasonIndex]).await.unwrap();

    let rows = store.list_ratings().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].sid, 1);
    assert_eq!(rows[0].epno, 0);

    let counts: std::collections::BTreeMap<u8, i64> =
        serde_json::from_str(&rows[0].score_counts).unwrap();
    assert_eq!(counts.len(), 10);
    assert_eq!(counts[&10], 70);

    let averages: std::collections::BTreeMap<String, f64> =
        serde_json::from_str(&rows[0].demographic_averages).unwrap();
    assert!((averages["Males"] - 7.9).abs() < f64::EPSILON);
}

#[tokio::test]
async fn a_broken_page_fails_its_subtree_but_not_the_crawl() {
    let store = temp_store().await;
    // The cold opening page has an actor link with an unknown prefix.
    let broken = r#"
      <table class="roleTable">
        <tr><td><a href="/Writers/?9">Somebody</a></td><td> ... </td><td>Self</td></tr>
      </table>
    "#;
    let archive = FakeArchive::new(&[
        ("/Seasons/", SEASON_INDEX),
        ("/Seasons/?1975", SEASON_PAGE),
        ("/Episodes/?19751011", EPISODE_PAGE),
        ("/Episodes/?197510111", broken),
        ("/Episodes/?1975101110", BEES_PAGE),
        ("/Episodes/?197510115", MUSICAL_PAGE),
    ]);

    let crawler = Crawler::new(
        &archive,
        None,
        TargetSet::default(),
        Pipeline::new(DedupeFilter::new()),
        &store,
    );
    let stats = crawler.run(vec![PageVisit::SeasonIndex]).await.unwrap();

    assert_eq!(stats.page_failures, 1);
    // The rest of the episode still made it in.
    let titles = store.list_titles().await.unwrap();
    assert!(titles.iter().any(|t| t.tid == "1975101110"));
    assert!(!titles.iter().any(|t| t.tid == "197510111"));
}
