use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use iced::Point;
use iced::widget::image;

use crate::favorites::FavoritesStore;
use crate::gesture::SwipeGesture;
use crate::model::Movie;
use crate::storage::KeyValueStore;
use crate::tmdb::CatalogClient;

/// Which tab is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Favorites,
}

/// A drag in progress on one card.
///
/// The anchor is the pointer position of the first move sample after the
/// press; offsets are measured from it.
#[derive(Debug, Clone, Copy)]
pub struct ActiveDrag {
    pub movie_id: i64,
    pub anchor: Option<Point>,
}

/// Application state: catalog results, the favorites store, and the
/// per-card gesture machines.
pub struct App {
    pub screen: Screen,
    pub movies: Vec<Movie>,
    pub favorites: FavoritesStore,
    pub catalog: CatalogClient,
    pub http: reqwest::Client,
    pub posters: HashMap<i64, image::Handle>,
    /// Gesture state per visible home-screen card, keyed by movie id.
    pub gestures: HashMap<i64, SwipeGesture>,
    pub active_drag: Option<ActiveDrag>,
    pub viewport_width: f32,
    pub last_tick: Option<Instant>,
    pub status: String,
}

impl App {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        App {
            screen: Screen::Home,
            movies: Vec::new(),
            favorites: FavoritesStore::new(storage),
            catalog: CatalogClient::from_env(),
            http: reqwest::Client::new(),
            posters: HashMap::new(),
            gestures: HashMap::new(),
            active_drag: None,
            viewport_width: 800.0,
            last_tick: None,
            status: "Loading movies...".to_string(),
        }
    }

    /// True while any card animation needs frame ticks.
    pub fn is_animating(&self) -> bool {
        self.gestures.values().any(SwipeGesture::is_animating)
    }
}
