//! Content stores: where the resolver gets a day's payload from

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use super::{ContentLoader, ContentPayload, FrontMatterError};
use crate::calendar::Day;

/// A day's payload could not be produced
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no content registered for day {0}")]
    Missing(Day),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed content in {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// Keyed lookup of day payloads.
///
/// Implementations may suspend (disk I/O, lazy rendering). A returned payload
/// must be handed out as-is: callers rely on `Arc` identity.
pub trait ContentStore: Send + Sync {
    fn get(
        &self,
        day: Day,
    ) -> impl Future<Output = Result<Arc<ContentPayload>, StoreError>> + Send;
}

impl<S: ContentStore> ContentStore for Arc<S> {
    fn get(
        &self,
        day: Day,
    ) -> impl Future<Output = Result<Arc<ContentPayload>, StoreError>> + Send {
        (**self).get(day)
    }
}

/// In-memory registry built up front
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<Day, Arc<ContentPayload>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload, replacing any previous one for the day
    pub fn insert(&mut self, day: Day, payload: ContentPayload) -> Arc<ContentPayload> {
        let payload = Arc::new(payload);
        self.entries.insert(day, Arc::clone(&payload));
        payload
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, day: Day, payload: ContentPayload) -> Self {
        self.insert(day, payload);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentStore for MemoryStore {
    async fn get(&self, day: Day) -> Result<Arc<ContentPayload>, StoreError> {
        self.entries
            .get(&day)
            .cloned()
            .ok_or(StoreError::Missing(day))
    }
}

/// Lazily loads `posts/<day>.md` and caches the rendered payload
pub struct DirectoryStore {
    loader: Arc<ContentLoader>,
    cache: RwLock<HashMap<Day, Arc<ContentPayload>>>,
}

impl DirectoryStore {
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Drop every cached payload so the next lookup rereads from disk
    pub fn invalidate(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if !cache.is_empty() {
            tracing::debug!("Invalidated {} cached day(s)", cache.len());
        }
        cache.clear();
    }

    /// Whether a payload for the day has been loaded since the last invalidation
    pub fn is_cached(&self, day: Day) -> bool {
        self.cached(day).is_some()
    }

    fn cached(&self, day: Day) -> Option<Arc<ContentPayload>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&day)
            .cloned()
    }

    async fn locate(&self, day: Day) -> Option<PathBuf> {
        for path in self.loader.candidate_files(day) {
            if let Ok(meta) = tokio::fs::metadata(&path).await {
                if meta.is_file() {
                    return Some(path);
                }
            }
        }
        None
    }
}

impl ContentStore for DirectoryStore {
    async fn get(&self, day: Day) -> Result<Arc<ContentPayload>, StoreError> {
        if let Some(payload) = self.cached(day) {
            return Ok(payload);
        }

        let path = self.locate(day).await.ok_or(StoreError::Missing(day))?;
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        // Highlighting is CPU bound; keep it off the async workers
        let loader = Arc::clone(&self.loader);
        let source_path = path.clone();
        let parsed = tokio::task::spawn_blocking(move || loader.parse(day, &source_path, &raw))
            .await
            .map_err(|e| StoreError::Io {
                path,
                source: std::io::Error::other(e),
            })?;
        let payload = Arc::new(parsed?);

        // A concurrent load may have won the race; keep the first payload
        // so that every caller sees the same Arc.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(day).or_insert(payload)))
    }
}
