//! Tests for owner-only membership operations against in-memory collaborators

use async_trait::async_trait;
use cadence_core::{
    membership, CadenceError, Membership, PlaylistId, PlaylistStore, Result, SongCatalog, SongId,
    UserId,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory playlist store backed by `Membership`
#[derive(Default)]
struct MemoryStore {
    playlists: Mutex<HashMap<PlaylistId, (UserId, Membership<SongId>)>>,
}

impl MemoryStore {
    fn with_playlist(playlist_id: &str, owner: &str, songs: &[&str]) -> Self {
        let store = Self::default();
        store.playlists.lock().unwrap().insert(
            PlaylistId::new(playlist_id),
            (
                UserId::new(owner),
                Membership::from_ordered(songs.iter().map(|s| SongId::new(*s))),
            ),
        );
        store
    }

    fn members(&self, playlist_id: &str) -> Vec<String> {
        self.playlists.lock().unwrap()[&PlaylistId::new(playlist_id)]
            .1
            .as_slice()
            .iter()
            .map(|id| id.to_string())
            .collect()
    }
}

#[async_trait]
impl PlaylistStore for MemoryStore {
    async fn get_playlist_members(&self, playlist_id: &PlaylistId) -> Result<Vec<SongId>> {
        Ok(self
            .playlists
            .lock()
            .unwrap()
            .get(playlist_id)
            .map(|(_, members)| members.as_slice().to_vec())
            .unwrap_or_default())
    }

    async fn append_member(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
        let mut playlists = self.playlists.lock().unwrap();
        let (_, members) = playlists
            .get_mut(playlist_id)
            .ok_or_else(|| CadenceError::not_found("Playlist", playlist_id.as_str()))?;
        members.append(song_id.clone())
    }

    async fn remove_member(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
        let mut playlists = self.playlists.lock().unwrap();
        let (_, members) = playlists
            .get_mut(playlist_id)
            .ok_or_else(|| CadenceError::not_found("Playlist", playlist_id.as_str()))?;
        members.remove(song_id).map(|_| ())
    }

    async fn get_playlist_owner(&self, playlist_id: &PlaylistId) -> Result<Option<UserId>> {
        Ok(self
            .playlists
            .lock()
            .unwrap()
            .get(playlist_id)
            .map(|(owner, _)| owner.clone()))
    }
}

struct MemoryCatalog(HashSet<SongId>);

impl MemoryCatalog {
    fn with_songs(songs: &[&str]) -> Self {
        Self(songs.iter().map(|s| SongId::new(*s)).collect())
    }
}

#[async_trait]
impl SongCatalog for MemoryCatalog {
    async fn song_exists(&self, song_id: &SongId) -> Result<bool> {
        Ok(self.0.contains(song_id))
    }
}

fn fixture() -> (MemoryStore, MemoryCatalog) {
    (
        MemoryStore::with_playlist("p1", "alice", &["A", "B", "C"]),
        MemoryCatalog::with_songs(&["A", "B", "C", "D"]),
    )
}

#[tokio::test]
async fn navigation_scenario_over_abc() {
    let (store, _) = fixture();
    let p1 = PlaylistId::new("p1");

    assert_eq!(membership::next_song(&store, &p1, &"B".into()).await.unwrap(), SongId::new("C"));
    assert_eq!(membership::next_song(&store, &p1, &"C".into()).await.unwrap(), SongId::new("A"));
    assert_eq!(membership::prev_song(&store, &p1, &"A".into()).await.unwrap(), SongId::new("C"));
}

#[tokio::test]
async fn add_appends_and_rejects_duplicates() {
    let (store, catalog) = fixture();
    let alice = UserId::new("alice");
    let p1 = PlaylistId::new("p1");

    membership::add_song(&store, &catalog, &alice, &p1, &"D".into())
        .await
        .unwrap();
    assert_eq!(store.members("p1"), ["A", "B", "C", "D"]);
    assert_eq!(membership::next_song(&store, &p1, &"C".into()).await.unwrap(), SongId::new("D"));

    let again = membership::add_song(&store, &catalog, &alice, &p1, &"D".into()).await;
    assert!(matches!(again, Err(CadenceError::DuplicateMember)));
}

#[tokio::test]
async fn remove_closes_gap() {
    let (store, catalog) = fixture();
    let p1 = PlaylistId::new("p1");

    membership::remove_song(&store, &catalog, &"alice".into(), &p1, &"B".into())
        .await
        .unwrap();

    assert_eq!(store.members("p1"), ["A", "C"]);
    assert_eq!(membership::next_song(&store, &p1, &"A".into()).await.unwrap(), SongId::new("C"));
}

#[tokio::test]
async fn non_owner_is_forbidden() {
    let (store, catalog) = fixture();
    let mallory = UserId::new("mallory");
    let p1 = PlaylistId::new("p1");

    let add = membership::add_song(&store, &catalog, &mallory, &p1, &"D".into()).await;
    assert!(matches!(add, Err(CadenceError::Forbidden(_))));

    let remove = membership::remove_song(&store, &catalog, &mallory, &p1, &"A".into()).await;
    assert!(matches!(remove, Err(CadenceError::Forbidden(_))));

    assert_eq!(store.members("p1"), ["A", "B", "C"]);
}

#[tokio::test]
async fn missing_playlist_or_song_is_not_found() {
    let (store, catalog) = fixture();
    let alice = UserId::new("alice");

    let no_playlist =
        membership::add_song(&store, &catalog, &alice, &"nope".into(), &"A".into()).await;
    assert!(matches!(no_playlist, Err(CadenceError::NotFound { .. })));

    let no_song = membership::add_song(&store, &catalog, &alice, &"p1".into(), &"Z".into()).await;
    assert!(matches!(no_song, Err(CadenceError::NotFound { .. })));

    let not_member =
        membership::remove_song(&store, &catalog, &alice, &"p1".into(), &"D".into()).await;
    assert!(matches!(not_member, Err(CadenceError::NotFound { .. })));
}

#[tokio::test]
async fn existence_is_checked_before_ownership() {
    let (store, catalog) = fixture();

    let result =
        membership::add_song(&store, &catalog, &"mallory".into(), &"p1".into(), &"Z".into()).await;
    assert!(matches!(result, Err(CadenceError::NotFound { .. })));
}

#[tokio::test]
async fn navigating_empty_or_unknown_playlist_fails() {
    let store = MemoryStore::with_playlist("empty", "alice", &[]);

    let empty = membership::next_song(&store, &"empty".into(), &"A".into()).await;
    assert!(matches!(empty, Err(CadenceError::EmptyPlaylist)));

    let unknown = membership::prev_song(&store, &"ghost".into(), &"A".into()).await;
    assert!(matches!(unknown, Err(CadenceError::EmptyPlaylist)));
}
