//! Integration tests for the playlists vertical slice
//!
//! Covers ownership, visibility queries, and the position-ordered
//! membership that navigation reads from.

mod test_helpers;

use cadence_core::{membership, types::*, CadenceError};
use cadence_storage::playlists;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "ana").await;

    let playlist = playlists::create(
        pool,
        CreatePlaylist {
            name: "Road Trip".to_string(),
            description: Some("Long drives".to_string()),
            owner_id: user_id.clone(),
            is_public: true,
        },
    )
    .await
    .expect("Failed to create playlist");

    assert_eq!(playlist.name, "Road Trip");
    assert_eq!(playlist.description.as_deref(), Some("Long drives"));
    assert!(playlist.is_owned_by(&user_id));
    assert!(playlist.is_public);

    let retrieved = playlists::get_by_id(pool, &playlist.id).await.unwrap().unwrap();
    assert_eq!(retrieved, playlist);

    let owner = playlists::get_owner(pool, &playlist.id).await.unwrap();
    assert_eq!(owner, Some(user_id));
}

#[tokio::test]
async fn test_unknown_playlist_has_no_owner() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let missing = PlaylistId::new("missing");
    assert!(playlists::get_by_id(pool, &missing).await.unwrap().is_none());
    assert!(playlists::get_owner(pool, &missing).await.unwrap().is_none());
    assert!(playlists::get_members(pool, &missing).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_owner_and_public_listings() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let ana = create_test_user(pool, "ana").await;
    let ben = create_test_user(pool, "ben").await;

    create_test_playlist(pool, "Ana Public", &ana, true).await;
    create_test_playlist(pool, "Ana Private", &ana, false).await;
    create_test_playlist(pool, "Ben Public", &ben, true).await;

    let owned = playlists::get_by_owner(pool, &ana).await.unwrap();
    assert_eq!(owned.len(), 2);
    assert!(owned.iter().all(|p| p.owner_id == ana));

    let public = playlists::get_public(pool).await.unwrap();
    let mut names: Vec<_> = public.iter().map(|p| p.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["Ana Public", "Ben Public"]);
}

#[tokio::test]
async fn test_appends_take_increasing_positions() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "ana").await;
    let playlist = create_test_playlist(pool, "Mix", &owner, false).await;
    let a = create_test_song(pool, "A", None).await;
    let b = create_test_song(pool, "B", None).await;
    let c = create_test_song(pool, "C", None).await;

    for song in [&a, &b, &c] {
        playlists::append_member(pool, &playlist, song).await.unwrap();
    }

    let entries = playlists::get_entries(pool, &playlist).await.unwrap();
    let positions: Vec<_> = entries.iter().map(|e| e.position).collect();
    assert_eq!(positions, [1, 2, 3]);

    let members = playlists::get_members(pool, &playlist).await.unwrap();
    assert_eq!(members, [a.clone(), b, c]);

    let err = playlists::append_member(pool, &playlist, &a).await.unwrap_err();
    assert!(matches!(err, CadenceError::DuplicateMember));
}

#[tokio::test]
async fn test_remove_keeps_relative_order_and_leaves_gap() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "ana").await;
    let playlist = create_test_playlist(pool, "Mix", &owner, false).await;
    let a = create_test_song(pool, "A", None).await;
    let b = create_test_song(pool, "B", None).await;
    let c = create_test_song(pool, "C", None).await;
    for song in [&a, &b, &c] {
        playlists::append_member(pool, &playlist, song).await.unwrap();
    }

    playlists::remove_member(pool, &playlist, &b).await.unwrap();

    let entries = playlists::get_entries(pool, &playlist).await.unwrap();
    let order: Vec<_> = entries.iter().map(|e| (e.song_id.clone(), e.position)).collect();
    assert_eq!(order, [(a.clone(), 1_i64), (c.clone(), 3_i64)]);

    // A re-added song goes to the end, after the gap
    playlists::append_member(pool, &playlist, &b).await.unwrap();
    let members = playlists::get_members(pool, &playlist).await.unwrap();
    assert_eq!(members, [a, c, b.clone()]);

    playlists::remove_member(pool, &playlist, &b).await.unwrap();
    let err = playlists::remove_member(pool, &playlist, &b).await.unwrap_err();
    assert!(matches!(err, CadenceError::NotFound { .. }));
}

#[tokio::test]
async fn test_concurrent_appends_get_distinct_positions() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool().clone();

    let owner = create_test_user(&pool, "ana").await;
    let playlist = create_test_playlist(&pool, "Party", &owner, true).await;

    let mut songs = Vec::new();
    for i in 0..8 {
        songs.push(create_test_song(&pool, &format!("Song {i}"), None).await);
    }

    let handles: Vec<_> = songs
        .iter()
        .cloned()
        .map(|song| {
            let pool = pool.clone();
            let playlist = playlist.clone();
            tokio::spawn(async move { playlists::append_member(&pool, &playlist, &song).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let entries = playlists::get_entries(&pool, &playlist).await.unwrap();
    let mut positions: Vec<_> = entries.iter().map(|e| e.position).collect();
    positions.dedup();
    assert_eq!(positions.len(), songs.len());
    assert_eq!(positions, (1..=8).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_get_songs_follows_position_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "ana").await;
    let playlist = create_test_playlist(pool, "Mix", &owner, false).await;
    let first = create_test_song(pool, "First", None).await;
    let second = create_test_song(pool, "Second", None).await;

    playlists::append_member(pool, &playlist, &second).await.unwrap();
    playlists::append_member(pool, &playlist, &first).await.unwrap();

    let songs = playlists::get_songs(pool, &playlist, Some(&owner)).await.unwrap();
    let titles: Vec<_> = songs.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Second", "First"]);
}

#[tokio::test]
async fn test_delete_requires_owner_and_cascades() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let ana = create_test_user(pool, "ana").await;
    let ben = create_test_user(pool, "ben").await;
    let playlist = create_test_playlist(pool, "Mix", &ana, true).await;
    let song = create_test_song(pool, "A", None).await;
    playlists::append_member(pool, &playlist, &song).await.unwrap();

    let err = playlists::delete(pool, &playlist, &ben).await.unwrap_err();
    assert!(matches!(err, CadenceError::Forbidden(_)));

    playlists::delete(pool, &playlist, &ana).await.unwrap();
    assert!(playlists::get_by_id(pool, &playlist).await.unwrap().is_none());
    assert!(playlists::get_entries(pool, &playlist).await.unwrap().is_empty());

    let err = playlists::delete(pool, &playlist, &ana).await.unwrap_err();
    assert!(matches!(err, CadenceError::NotFound { .. }));
}

#[tokio::test]
async fn test_deleting_a_song_drops_it_from_playlists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "ana").await;
    let playlist = create_test_playlist(pool, "Mix", &owner, false).await;
    let a = create_test_song(pool, "A", None).await;
    let b = create_test_song(pool, "B", None).await;
    playlists::append_member(pool, &playlist, &a).await.unwrap();
    playlists::append_member(pool, &playlist, &b).await.unwrap();

    cadence_storage::songs::delete(pool, &a).await.unwrap();

    let members = playlists::get_members(pool, &playlist).await.unwrap();
    assert_eq!(members, [b]);
}

#[tokio::test]
async fn test_membership_service_over_sqlite() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "ana").await;
    let intruder = create_test_user(pool, "eve").await;
    let playlist = create_test_playlist(pool, "Mix", &owner, false).await;
    let a = create_test_song(pool, "A", None).await;
    let b = create_test_song(pool, "B", None).await;
    let c = create_test_song(pool, "C", None).await;

    let err = membership::next_song(db, &playlist, &a).await.unwrap_err();
    assert!(matches!(err, CadenceError::EmptyPlaylist));

    for song in [&a, &b, &c] {
        membership::add_song(db, db, &owner, &playlist, song).await.unwrap();
    }

    assert_eq!(membership::next_song(db, &playlist, &b).await.unwrap(), c);
    assert_eq!(membership::next_song(db, &playlist, &c).await.unwrap(), a);
    assert_eq!(membership::prev_song(db, &playlist, &a).await.unwrap(), c);

    let err = membership::add_song(db, db, &owner, &playlist, &a).await.unwrap_err();
    assert!(matches!(err, CadenceError::DuplicateMember));

    let err = membership::remove_song(db, db, &intruder, &playlist, &a)
        .await
        .unwrap_err();
    assert!(matches!(err, CadenceError::Forbidden(_)));

    let missing = SongId::new("missing");
    let err = membership::add_song(db, db, &intruder, &playlist, &missing)
        .await
        .unwrap_err();
    assert!(matches!(err, CadenceError::NotFound { .. }));

    membership::remove_song(db, db, &owner, &playlist, &b).await.unwrap();
    assert_eq!(membership::next_song(db, &playlist, &a).await.unwrap(), c);
}
