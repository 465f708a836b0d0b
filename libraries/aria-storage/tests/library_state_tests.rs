//! Integration tests for overrides, favorites, and search history
//!
//! These three slices feed the overlay and search stages of library
//! assembly.


use aria_core::{MetadataOverride, TrackId};
use aria_storage::{favorites, overrides, search_history};
use test_helpers::TestDb;

// ===== Metadata overrides =====

#[tokio::test]
async fn override_upsert_and_get_all() {
    let db = TestDb::new().await;
    let track = TrackId::new("42");

    overrides::upsert(
        db.pool(),
        &track,
        &MetadataOverride {
            title: Some("Corrected Title".to_string()),
            artist: None,
            album: Some("Corrected Album".to_string()),
            cover_path: None,
        },
    )
    .await
    .unwrap();

    let all = overrides::get_all(db.pool()).await.unwrap();
    assert_eq!(all.len(), 1);
    let ov = &all[&track];
    assert_eq!(ov.title.as_deref(), Some("Corrected Title"));
    assert_eq!(ov.artist, None);
    assert_eq!(ov.album.as_deref(), Some("Corrected Album"));
}

#[tokio::test]
async fn override_update_replaces_fields() {
    let db = TestDb::new().await;
    let track = TrackId::new("42");

    overrides::upsert(
        db.pool(),
        &track,
        &MetadataOverride {
            title: Some("First".to_string()),
            ..MetadataOverride::default()
        },
    )
    .await
    .unwrap();

    // Second save carries only an artist: the title override is gone, not
    // merged. The row mirrors the latest edit form.
    overrides::upsert(
        db.pool(),
        &track,
        &MetadataOverride {
            artist: Some("Someone".to_string()),
            ..MetadataOverride::default()
        },
    )
    .await
    .unwrap();

    let ov = overrides::get(db.pool(), &track).await.unwrap().unwrap();
    assert_eq!(ov.title, None);
    assert_eq!(ov.artist.as_deref(), Some("Someone"));
}

#[tokio::test]
async fn empty_override_removes_the_row() {
    let db = TestDb::new().await;
    let track = TrackId::new("42");

    overrides::upsert(
        db.pool(),
        &track,
        &MetadataOverride {
            title: Some("Temp".to_string()),
            ..MetadataOverride::default()
        },
    )
    .await
    .unwrap();

    overrides::upsert(db.pool(), &track, &MetadataOverride::default())
        .await
        .unwrap();

    assert!(overrides::get(db.pool(), &track).await.unwrap().is_none());
    assert!(overrides::get_all(db.pool()).await.unwrap().is_empty());
}

// ===== Favorites =====

#[tokio::test]
async fn favorites_add_remove_and_list() {
    let db = TestDb::new().await;
    let a = TrackId::new("a");
    let b = TrackId::new("b");

    favorites::add(db.pool(), &a).await.unwrap();
    favorites::add(db.pool(), &b).await.unwrap();
    // Double-add is a no-op.
    favorites::add(db.pool(), &a).await.unwrap();

    let all = favorites::get_all(db.pool()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.contains(&a) && all.contains(&b));
    assert!(favorites::is_favorite(db.pool(), &a).await.unwrap());

    assert!(favorites::remove(db.pool(), &a).await.unwrap());
    assert!(!favorites::remove(db.pool(), &a).await.unwrap());
    assert!(!favorites::is_favorite(db.pool(), &a).await.unwrap());
}

#[tokio::test]
async fn favorite_toggle_flips_state() {
    let db = TestDb::new().await;
    let track = TrackId::new("x");

    assert!(favorites::toggle(db.pool(), &track).await.unwrap());
    assert!(favorites::is_favorite(db.pool(), &track).await.unwrap());
    assert!(!favorites::toggle(db.pool(), &track).await.unwrap());
    assert!(!favorites::is_favorite(db.pool(), &track).await.unwrap());
}

// ===== Search history =====

#[tokio::test]
async fn history_is_newest_first_and_bounded() {
    let db = TestDb::new().await;

    for i in 0..25 {
        search_history::record(db.pool(), &format!("query {i}"))
            .await
            .unwrap();
    }

    let recent = search_history::get_recent(db.pool()).await.unwrap();
    assert_eq!(recent.len(), 20);
    assert_eq!(recent[0].query, "query 24");
    assert_eq!(recent[19].query, "query 5");
    // The oldest five were pruned.
    assert!(!recent.iter().any(|item| item.query == "query 4"));
}

#[tokio::test]
async fn history_dedup_is_case_insensitive() {
    let db = TestDb::new().await;

    search_history::record(db.pool(), "Beatles").await.unwrap();
    search_history::record(db.pool(), "queen").await.unwrap();
    search_history::record(db.pool(), "BEATLES").await.unwrap();

    let recent = search_history::get_recent(db.pool()).await.unwrap();
    assert_eq!(recent.len(), 2);
    // Re-searching moved it to the top, with the latest casing.
    assert_eq!(recent[0].query, "BEATLES");
    assert_eq!(recent[1].query, "queen");
}

#[tokio::test]
async fn blank_queries_are_ignored() {
    let db = TestDb::new().await;

    search_history::record(db.pool(), "").await.unwrap();
    search_history::record(db.pool(), "   ").await.unwrap();

    assert!(search_history::get_recent(db.pool()).await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_empties_the_history() {
    let db = TestDb::new().await;

    search_history::record(db.pool(), "one").await.unwrap();
    search_history::record(db.pool(), "two").await.unwrap();

    assert_eq!(search_history::clear(db.pool()).await.unwrap(), 2);
    assert!(search_history::get_recent(db.pool()).await.unwrap().is_empty());
}
