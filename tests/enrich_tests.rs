//! Enrichment-engine tests against a seeded store.

use sketcharr::db::Store;
use sketcharr::enrich::EnrichmentService;
use sketcharr::gender::GenderResolver;
use sketcharr::models::{
    Actor, ActorType, Appearance, Capacity, CastMembership, Episode, Item, Season, Title,
};

async fn temp_store() -> Store {
    let db_path = std::env::temp_dir().join(format!("sketcharr-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create test store")
}

fn season(sid: i32, year: i32) -> Item {
    Item::Season(Season { sid, year })
}

fn episode(epid: &str, epno: i32, sid: i32) -> Item {
    Item::Episode(Episode {
        epid: epid.into(),
        epno,
        sid,
        aired: String::new(),
    })
}

fn cast_actor(aid: &str) -> Item {
    Item::Actor(Actor {
        aid: aid.into(),
        url: Some(format!("/Cast/?{aid}")),
        actor_type: ActorType::Cast,
    })
}

fn membership(aid: &str, sid: i32, first: Option<&str>, last: Option<&str>) -> Item {
    Item::CastMembership(CastMembership {
        aid: aid.into(),
        sid,
        featured: Some(false),
        update_anchor: Some(false),
        first_epid: first.map(Into::into),
        last_epid: last.map(Into::into),
    })
}

fn title(tid: &str, epid: &str, category: &str, order: i32) -> Item {
    Item::Title(Title {
        tid: tid.into(),
        epid: epid.into(),
        category: category.into(),
        name: None,
        skid: None,
        order,
    })
}

fn appearance(aid: &str, tid: &str) -> Item {
    Item::Appearance(Appearance {
        aid: aid.into(),
        tid: tid.into(),
        capacity: Capacity::Cast,
        role: None,
        impid: None,
        charid: None,
        voice: Some(false),
    })
}

/// Two seasons, three episodes, one two-stint cast member.
async fn seeded_store() -> Store {
    let store = temp_store().await;
    let items = vec![
        season(1, 1975),
        season(2, 1976),
        episode("19751011", 0, 1),
        episode("19751018", 1, 1),
        episode("19760925", 0, 2),
        episode("19761002", 1, 2),
        cast_actor("Al Franken"),
        cast_actor("George Coe"),
        // Full first season, then a return stint starting mid-season.
        membership("Al Franken", 1, None, None),
        membership("Al Franken", 2, Some("19761002"), None),
        membership("George Coe", 1, None, None),
        title("197510111", "19751011", "Sketch", 0),
        title("197510112", "19751011", "Goodnights", 1),
        title("197510181", "19751018", "Sketch", 0),
        title("197610021", "19761002", "Sketch", 0),
        appearance("Al Franken", "197510111"),
        appearance("Al Franken", "197610021"),
        appearance("George Coe", "197510111"),
    ];
    for item in items {
        store.insert_item(&item).await.unwrap();
    }
    store
}

async fn enrich(store: &Store, airtime: bool) {
    EnrichmentService::new(store.clone(), GenderResolver::new())
        .run(airtime)
        .await
        .unwrap();
}

#[tokio::test]
async fn season_boundaries_cover_every_episode() {
    let store = seeded_store().await;
    enrich(&store, false).await;

    let seasons = store.list_seasons().await.unwrap();
    let s1 = seasons.iter().find(|s| s.sid == 1).unwrap();
    assert_eq!(s1.first_epid.as_deref(), Some("19751011"));
    assert_eq!(s1.last_epid.as_deref(), Some("19751018"));
    assert_eq!(s1.n_episodes, Some(2));

    // Every episode falls inside its season's boundary.
    for e in store.list_episodes().await.unwrap() {
        let s = seasons.iter().find(|s| s.sid == e.sid).unwrap();
        assert!(s.first_epid.as_deref().unwrap() <= e.epid.as_str());
        assert!(s.last_epid.as_deref().unwrap() >= e.epid.as_str());
    }
}

#[tokio::test]
async fn join_columns_flow_through_titles_to_appearances() {
    let store = seeded_store().await;
    enrich(&store, false).await;

    let titles = store.list_titles().await.unwrap();
    let t = titles.iter().find(|t| t.tid == "197610021").unwrap();
    assert_eq!(t.sid, Some(2));

    let apps = store.list_appearances().await.unwrap();
    let a = apps.iter().find(|a| a.tid == "197610021").unwrap();
    assert_eq!(a.epid.as_deref(), Some("19761002"));
    assert_eq!(a.sid, Some(2));
}

#[tokio::test]
async fn full_season_memberships_inherit_the_season_boundary() {
    let store = seeded_store().await;
    enrich(&store, false).await;

    let casts = store.list_casts().await.unwrap();
    let full = casts
        .iter()
        .find(|c| c.aid == "Al Franken" && c.sid == 1)
        .unwrap();
    assert_eq!(full.n_episodes, Some(2));
    assert!((full.season_fraction.unwrap() - 1.0).abs() < f64::EPSILON);

    let partial = casts
        .iter()
        .find(|c| c.aid == "Al Franken" && c.sid == 2)
        .unwrap();
    assert_eq!(partial.n_episodes, Some(1));
    assert!((partial.season_fraction.unwrap() - 0.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn tenure_aggregates_across_non_contiguous_stints() {
    let store = seeded_store().await;
    enrich(&store, false).await;

    let tenures = store.list_tenures().await.unwrap();
    let al = tenures.iter().find(|t| t.aid == "Al Franken").unwrap();
    assert_eq!(al.n_seasons, 2);
    assert_eq!(al.n_episodes, 3);
    assert_eq!(al.eps_present, 2);
    assert!(al.eps_present <= al.n_episodes);
}

#[tokio::test]
async fn membership_corrections_shrink_the_window() {
    let store = seeded_store().await;
    enrich(&store, false).await;

    // George Coe's first-season record is corrected to end at the premiere.
    let casts = store.list_casts().await.unwrap();
    let coe = casts.iter().find(|c| c.aid == "George Coe").unwrap();
    assert_eq!(coe.last_epid.as_deref(), Some("19751011"));
    assert_eq!(coe.n_episodes, Some(1));

    let tenures = store.list_tenures().await.unwrap();
    let coe = tenures.iter().find(|t| t.aid == "George Coe").unwrap();
    assert_eq!(coe.n_episodes, 1);
    assert_eq!(coe.eps_present, 1);
}

#[tokio::test]
async fn airtime_splits_episodes_between_qualifying_titles() {
    let store = seeded_store().await;
    enrich(&store, true).await;

    let titles = store.list_titles().await.unwrap();
    // The premiere has one qualifying segment (Goodnights never counts).
    let sketch = titles.iter().find(|t| t.tid == "197510111").unwrap();
    assert!((sketch.episode_share.unwrap() - 1.0).abs() < f64::EPSILON);
    assert_eq!(sketch.n_performers, Some(2));
    assert!((sketch.cast_episode_share.unwrap() - 0.5).abs() < f64::EPSILON);

    let goodnights = titles.iter().find(|t| t.tid == "197510112").unwrap();
    assert_eq!(goodnights.episode_share, None);
}

#[tokio::test]
async fn gender_is_inferred_with_overrides() {
    let store = seeded_store().await;
    store
        .insert_item(&cast_actor("Dana Carvey"))
        .await
        .unwrap();
    enrich(&store, false).await;

    let actors = store.list_actors().await.unwrap();
    let al = actors.iter().find(|a| a.aid == "Al Franken").unwrap();
    assert_eq!(al.gender.as_deref(), Some("male"));

    // "Dana" alone is androgynous; the full-name override settles it.
    let dana = actors.iter().find(|a| a.aid == "Dana Carvey").unwrap();
    assert_eq!(dana.gender.as_deref(), Some("male"));
}

#[tokio::test]
async fn repeated_actor_inserts_merge_by_precedence() {
    let store = temp_store().await;
    store
        .insert_item(&Item::Actor(Actor {
            aid: "Kristen Wiig".into(),
            url: None,
            actor_type: ActorType::Guest,
        }))
        .await
        .unwrap();
    store
        .insert_item(&Item::Actor(Actor {
            aid: "Kristen Wiig".into(),
            url: Some("/Cast/?KrWi".into()),
            actor_type: ActorType::Cast,
        }))
        .await
        .unwrap();
    // A later, weaker sighting must not downgrade the record.
    store
        .insert_item(&Item::Actor(Actor {
            aid: "Kristen Wiig".into(),
            url: None,
            actor_type: ActorType::Guest,
        }))
        .await
        .unwrap();

    let actors = store.list_actors().await.unwrap();
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].actor_type, "cast");
    assert_eq!(actors[0].url.as_deref(), Some("/Cast/?KrWi"));
}
