mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use common::{init_tracing, mixed_round, par_four_round};
use hole_out::controller::RoundService;
use hole_out::error::CoreError;
use hole_out::model::{HoleRecord, RoundAggregate, Tees};
use hole_out::storage::{MemoryRoundStore, RoundStore, SqliteRoundStore, StorageError};
use tempfile::TempDir;

fn sqlite_in(dir: &TempDir, name: &str) -> SqliteRoundStore {
    SqliteRoundStore::open(dir.path().join(format!("{name}.db"))).expect("open sqlite store")
}

async fn round_trip_keeps_every_field(store: &dyn RoundStore) {
    let mut round = mixed_round(2);
    round.holes_played = 14;
    store.save(&round).await.expect("save");

    let loaded = store
        .fetch(round.round_id)
        .await
        .expect("fetch")
        .expect("round present");
    assert_eq!(loaded, round);
    for (before, after) in round.holes().iter().zip(loaded.holes()) {
        assert_eq!(before.flags(), after.flags());
        assert_eq!(before.advanced_tracking(), after.advanced_tracking());
    }
    assert_eq!(loaded.summary(), round.summary());
}

async fn save_replaces_and_lists_newest_first(store: &dyn RoundStore) {
    let mut old = par_four_round(1, 18);
    old.date = Utc::now() - Duration::days(3);
    let mut new = par_four_round(1, 18);
    new.date = Utc::now();
    store.save(&old).await.expect("save old");
    store.save(&new).await.expect("save new");

    // second save of the same id replaces the first
    common::score_hole(&mut old, 4, 6, Some((3, 0, 1)));
    old.complete();
    store.save(&old).await.expect("resave old");

    let all = store.fetch_all().await.expect("fetch all");
    let ids: Vec<_> = all.iter().map(|r| r.round_id).collect();
    assert_eq!(ids, vec![new.round_id, old.round_id]);
    assert_eq!(all[1], old);
    assert!(all[1].is_complete);
    assert_eq!(all[1].holes()[4].penalties(), 1);
}

async fn delete_removes_the_round(store: &dyn RoundStore) {
    let round = mixed_round(1);
    store.save(&round).await.expect("save");
    store.delete(round.round_id).await.expect("delete");
    assert_eq!(store.fetch(round.round_id).await.expect("fetch"), None);
    assert_eq!(
        store.delete(round.round_id).await,
        Err(StorageError::NotFound(round.round_id))
    );
}

#[tokio::test]
async fn memory_store_round_trip() {
    init_tracing();
    round_trip_keeps_every_field(&MemoryRoundStore::new()).await;
    save_replaces_and_lists_newest_first(&MemoryRoundStore::new()).await;
    delete_removes_the_round(&MemoryRoundStore::new()).await;
}

#[tokio::test]
async fn sqlite_store_round_trip() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    round_trip_keeps_every_field(&sqlite_in(&dir, "round_trip")).await;
    save_replaces_and_lists_newest_first(&sqlite_in(&dir, "listing")).await;
    delete_removes_the_round(&sqlite_in(&dir, "delete")).await;
}

#[tokio::test]
async fn sqlite_rounds_survive_reopen() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let round = mixed_round(3);
    {
        let store = sqlite_in(&dir, "reopen");
        store.save(&round).await.expect("save");
    }
    let reopened = sqlite_in(&dir, "reopen");
    let loaded = reopened
        .fetch(round.round_id)
        .await
        .expect("fetch")
        .expect("round present");
    assert_eq!(loaded, round);
}

#[tokio::test]
async fn service_starts_completes_and_filters() {
    init_tracing();
    let service = RoundService::new(Arc::new(MemoryRoundStore::new()));
    let lakeside = common::course(1, "Lakeside");
    let hilltop = common::course(2, "Hilltop");

    let mut first = service
        .start_round(&lakeside, Tees::Blue)
        .await
        .expect("start");
    assert_eq!(first.holes().len(), 18);
    assert!(first.holes().iter().all(|h| !h.is_scored()));
    service.start_round(&hilltop, Tees::Red).await.expect("start");

    common::score_hole(&mut first, 0, 3, None);
    service.complete_round(&mut first).await.expect("complete");
    assert!(first.is_complete);

    let at_lakeside = service.rounds_by_course(1).await.expect("by course");
    assert_eq!(at_lakeside.len(), 1);
    assert_eq!(at_lakeside[0].total_score(), 3);
    assert_eq!(service.all_rounds().await.expect("all").len(), 2);

    service.delete_round(first.round_id).await.expect("delete");
    assert!(matches!(
        service.delete_round(first.round_id).await,
        Err(CoreError::Storage(StorageError::NotFound(_)))
    ));
    assert_eq!(service.round(first.round_id).await.expect("fetch"), None);
    match service.require_round(first.round_id).await {
        Err(CoreError::NotFound(what)) => assert!(what.contains(&first.round_id.to_string())),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn round_from_repeated_holes_still_saves() {
    init_tracing();
    let mut course = common::course(4, "Doubled");
    let mut extra = course.holes[0].clone();
    extra.par = 5;
    course.holes.insert(1, extra);
    let round = RoundAggregate::start(&course, Tees::White);
    assert_eq!(round.holes().len(), 18);
    assert_eq!(round.hole_by_number(1).map(HoleRecord::par), Some(4));

    let dir = TempDir::new().expect("temp dir");
    let store = sqlite_in(&dir, "repeated");
    store.save(&round).await.expect("save");
    let loaded = store
        .fetch(round.round_id)
        .await
        .expect("fetch")
        .expect("round present");
    assert_eq!(loaded, round);
}
