use std::{collections::HashMap, path::PathBuf};

use tokio::sync::Mutex;

use crate::warning;

/// Persisted artist → genre-list cache shared by all aggregation runs.
///
/// The cache is read once at the start of a run and treated as read-only
/// until the run completes; newly discovered mappings are merged back in a
/// single write-through at the end. The mutex serializes the
/// read-modify-write so two finishing runs in this process cannot drop each
/// other's discoveries.
pub struct GenreCacheManager {
    path: PathBuf,
    lock: Mutex<()>,
}

impl GenreCacheManager {
    pub fn new() -> Self {
        Self::with_path(Self::cache_path())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Loads the persisted mapping. A missing file is an empty cache; a
    /// corrupt one is logged and likewise treated as empty rather than
    /// aborting the run.
    pub async fn load(&self) -> HashMap<String, Vec<String>> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(cache) => cache,
                Err(e) => {
                    warning!("Genre cache at {} is unreadable: {}", self.path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        }
    }

    /// Merges newly discovered mappings into the persisted cache.
    pub async fn merge(&self, discovered: &HashMap<String, Vec<String>>) -> Result<(), String> {
        if discovered.is_empty() {
            return Ok(());
        }

        let _guard = self.lock.lock().await;
        let mut cache = self.load().await;
        for (artist, genres) in discovered {
            cache.insert(artist.clone(), genres.clone());
        }

        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&cache).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("plotify/store/genres.json");
        path
    }
}

impl Default for GenreCacheManager {
    fn default() -> Self {
        Self::new()
    }
}
