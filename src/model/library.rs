//! Saved songs and their persistence

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::song::Song;

/// Storage key of the saved-songs list
pub const SAVED_SONGS_KEY: &str = "saved_songs";

/// String key-value storage, the local stand-in for browser storage
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key under a data directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read storage file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let dir = Path::new(&self.dir);
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the saved-songs list under `SAVED_SONGS_KEY`
pub struct LibraryStore {
    storage: Box<dyn KeyValueStorage>,
}

impl LibraryStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::default()))
    }

    /// Absent or unparsable data loads as an empty list
    pub fn load(&self) -> Vec<Song> {
        let Some(content) = self.storage.get(SAVED_SONGS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&content) {
            Ok(songs) => songs,
            Err(e) => {
                tracing::warn!(error = %e, "Stored library is malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Full overwrite of the stored list
    pub fn save(&self, songs: &[Song]) -> Result<()> {
        let content = serde_json::to_string(songs)?;
        self.storage.set(SAVED_SONGS_KEY, &content)
    }
}

/// The user's saved songs, persisted after every mutation
pub struct Library {
    songs: Vec<Song>,
    store: LibraryStore,
}

impl Library {
    pub fn open(store: LibraryStore) -> Self {
        let songs = store.load();
        tracing::info!(count = songs.len(), "Library loaded");
        Self { songs, store }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn contains(&self, song: &Song) -> bool {
        self.songs.iter().any(|s| s.same_track(song))
    }

    /// Removes every entry with the song's (title, artist) or appends it.
    /// Returns whether the song is saved afterwards.
    pub fn toggle(&mut self, song: &Song) -> bool {
        let saved = if self.contains(song) {
            self.songs.retain(|s| !s.same_track(song));
            false
        } else {
            self.songs.push(song.clone());
            true
        };
        self.persist();
        saved
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.songs) {
            tracing::error!(error = %e, "Failed to persist library");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::song::sample_song;

    /// Shares one `MemoryStorage` between several stores
    struct SharedStorage(Arc<MemoryStorage>);

    impl KeyValueStorage for SharedStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut library = Library::open(LibraryStore::in_memory());
        library.toggle(&sample_song("a", "Ditto", "NewJeans"));
        let before = library.songs().to_vec();

        let song = sample_song("b", "Some", "BOL4");
        assert!(library.toggle(&song));
        assert!(!library.toggle(&song));
        assert_eq!(library.songs(), before.as_slice());
    }

    #[test]
    fn test_identity_is_title_and_artist() {
        let mut library = Library::open(LibraryStore::in_memory());
        library.toggle(&sample_song("search-0-1", "Gradation", "10CM"));

        let refetched = sample_song("rec-4-99", "Gradation", "10CM");
        assert!(library.contains(&refetched));
        assert!(!library.toggle(&refetched));
        assert!(library.is_empty());
    }

    #[test]
    fn test_toggle_appends_unchanged_in_order() {
        let mut library = Library::open(LibraryStore::in_memory());
        let first = sample_song("1", "Love Lee", "AKMU");
        let second = sample_song("2", "Bam Yang Gang", "BIBI");
        library.toggle(&first);
        library.toggle(&second);
        assert_eq!(library.songs(), &[first, second]);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = Arc::new(MemoryStorage::default());
        let songs = vec![
            sample_song("1", "Love wins all", "IU"),
            sample_song("2", "You Were Beautiful", "DAY6"),
        ];

        let mut library = Library::open(LibraryStore::new(Box::new(SharedStorage(storage.clone()))));
        for song in &songs {
            library.toggle(song);
        }

        let reloaded = Library::open(LibraryStore::new(Box::new(SharedStorage(storage))));
        assert_eq!(reloaded.songs(), songs.as_slice());
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let storage = MemoryStorage::default();
        storage.set(SAVED_SONGS_KEY, "{not a list").unwrap();
        let store = LibraryStore::new(Box::new(storage));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");
        let store = LibraryStore::new(Box::new(FileStorage::new(&data_dir)));
        assert!(store.load().is_empty());

        let songs = vec![sample_song("1", "Some", "BOL4")];
        store.save(&songs).unwrap();
        assert!(data_dir.join("saved_songs.json").exists());

        let reopened = LibraryStore::new(Box::new(FileStorage::new(&data_dir)));
        assert_eq!(reopened.load(), songs);
    }
}
