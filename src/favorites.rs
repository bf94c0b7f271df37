//! Favorites store: the in-memory authoritative list of favorite movies,
//! synchronized to durable storage.
//!
//! Mutations apply to the in-memory list synchronously; the durable write
//! is a separate fire-and-forget future so the UI loop never blocks on
//! disk. Each write serializes the whole list under one key, so concurrent
//! writes are last-writer-wins.

use std::future::Future;
use std::sync::Arc;

use crate::model::Movie;
use crate::storage::{KeyValueStore, StorageError};

/// Fixed storage key owned exclusively by this store.
pub const FAVORITES_KEY: &str = "@favorites";

pub struct FavoritesStore {
    movies: Vec<Movie>,
    storage: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    /// Empty store; call [`FavoritesStore::hydrate`] and feed the result
    /// back via [`FavoritesStore::set_hydrated`] to restore prior state.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        FavoritesStore {
            movies: Vec::new(),
            storage,
        }
    }

    /// Load the persisted favorites list.
    ///
    /// Missing key and corrupt blob both degrade to an empty list; the
    /// corrupt case is logged. Never fails the caller.
    pub fn hydrate(
        storage: Arc<dyn KeyValueStore>,
    ) -> impl Future<Output = Vec<Movie>> + Send + 'static {
        async move {
            let blob = match storage.get(FAVORITES_KEY).await {
                Ok(Some(blob)) => blob,
                Ok(None) => return Vec::new(),
                Err(e) => {
                    log::error!("failed to read favorites: {e}");
                    return Vec::new();
                }
            };
            match serde_json::from_str::<Vec<Movie>>(&blob) {
                Ok(movies) => movies,
                Err(e) => {
                    log::error!("persisted favorites are corrupt, starting empty: {e}");
                    Vec::new()
                }
            }
        }
    }

    /// Replace the in-memory list with the hydrated one.
    pub fn set_hydrated(&mut self, movies: Vec<Movie>) {
        self.movies = movies;
    }

    /// Append `movie` unless its id is already present.
    ///
    /// Returns whether the list changed; when it did, the caller should
    /// spawn [`FavoritesStore::persist`].
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.contains(movie.id) {
            return false;
        }
        self.movies.push(movie);
        true
    }

    /// Remove every entry with this id (at most one, per the uniqueness
    /// invariant). Returns whether the list changed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        self.movies.len() != before
    }

    pub fn contains(&self, id: i64) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    /// Current list, in insertion order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Write the whole current list as one blob.
    ///
    /// Snapshots the list and storage handle, so the returned future is
    /// `'static` and safe to run after further mutations; a failure leaves
    /// the in-memory state untouched.
    pub fn persist(&self) -> impl Future<Output = Result<(), StorageError>> + Send + 'static {
        let storage = Arc::clone(&self.storage);
        let snapshot = self.movies.clone();
        async move {
            let blob = serde_json::to_string(&snapshot)?;
            storage.set(FAVORITES_KEY, blob).await
        }
    }
}
