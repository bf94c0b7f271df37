use std::sync::Arc;
use std::time::Instant;

use iced::event;
use iced::{Element, Subscription, Task};

use crate::favorites::FavoritesStore;
use crate::gesture::Tick;
use crate::message::Message;
use crate::model::Movie;
use crate::poster;
use crate::state::{ActiveDrag, App};
use crate::storage::{FileStore, KeyValueStore};
use crate::ui;

/// Longest dt fed to the gesture animations; a stalled frame should not
/// teleport cards.
const MAX_FRAME_SECS: f32 = 0.1;

impl App {
    /// Build the initial state and kick off favorites hydration and the
    /// catalog fetch.
    pub fn boot() -> (Self, Task<Message>) {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new());
        let app = App::new(Arc::clone(&storage));

        let hydrate = Task::perform(
            FavoritesStore::hydrate(storage),
            Message::FavoritesHydrated,
        );
        let catalog = app.catalog.clone();
        let fetch = Task::perform(
            async move { catalog.fetch_popular().await },
            Message::MoviesFetched,
        );

        (app, Task::batch([hydrate, fetch]))
    }

    /// Handle UI messages and state updates.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MoviesFetched(movies) => {
                self.status = if movies.is_empty() {
                    "No movies available".to_string()
                } else {
                    format!("{} popular movies", movies.len())
                };
                self.movies = movies;
                self.load_missing_posters()
            }
            Message::FavoritesHydrated(movies) => {
                log::info!("restored {} favorites", movies.len());
                self.favorites.set_hydrated(movies);
                self.load_missing_posters()
            }
            Message::PersistFinished(result) => {
                // Best-effort durability: the in-memory list stands either way.
                if let Err(e) = result {
                    log::error!("failed to persist favorites: {e}");
                    self.status = "Favorites could not be saved".to_string();
                }
                Task::none()
            }
            Message::PosterLoaded(id, handle) => {
                if let Some(handle) = handle {
                    self.posters.insert(id, handle);
                }
                Task::none()
            }
            Message::TabSelected(screen) => {
                self.screen = screen;
                Task::none()
            }
            Message::CardPressed(id) => {
                self.active_drag = Some(ActiveDrag {
                    movie_id: id,
                    anchor: None,
                });
                Task::none()
            }
            Message::CardMoved(id, point) => {
                let Some(drag) = self.active_drag.as_mut() else {
                    return Task::none();
                };
                if drag.movie_id != id {
                    return Task::none();
                }
                let gesture = self.gestures.entry(id).or_default();
                match drag.anchor {
                    Some(anchor) => {
                        gesture.drag_to(point.x - anchor.x, point.y - anchor.y);
                    }
                    None => {
                        drag.anchor = Some(point);
                        gesture.drag_to(0.0, 0.0);
                    }
                }
                Task::none()
            }
            Message::CardReleased(id) => {
                let held = self
                    .active_drag
                    .is_some_and(|drag| drag.movie_id == id);
                if held {
                    self.active_drag = None;
                    if let Some(gesture) = self.gestures.get_mut(&id) {
                        gesture.release(self.viewport_width);
                    }
                }
                Task::none()
            }
            Message::RemoveFavorite(id) => {
                if self.favorites.remove(id) {
                    self.persist_favorites()
                } else {
                    Task::none()
                }
            }
            Message::AnimationTick(now) => self.advance_animations(now),
            Message::EventOccurred(event) => {
                if let iced::Event::Window(iced::window::Event::Resized(size)) = event {
                    self.viewport_width = size.width;
                }
                Task::none()
            }
        }
    }

    /// Advance every card animation by one frame and apply commit effects.
    fn advance_animations(&mut self, now: Instant) -> Task<Message> {
        let dt = self
            .last_tick
            .map(|t| now.duration_since(t).as_secs_f32())
            .unwrap_or(1.0 / 60.0)
            .min(MAX_FRAME_SECS);
        self.last_tick = Some(now);

        let mut committed: Vec<i64> = Vec::new();
        for (id, gesture) in self.gestures.iter_mut() {
            if gesture.tick(dt) == Tick::Committed {
                committed.push(*id);
            }
        }

        let mut tasks = Vec::new();
        for id in committed {
            self.gestures.remove(&id);
            // The card may have vanished while the fly-out ran; a stale
            // completion must not touch the store.
            let Some(index) = self.movies.iter().position(|m| m.id == id) else {
                continue;
            };
            let movie = self.movies.remove(index);
            self.status = format!("Added '{}' to favorites", movie.title);
            if self.favorites.add(movie) {
                tasks.push(self.persist_favorites());
            }
        }

        if !self.is_animating() {
            self.last_tick = None;
        }
        Task::batch(tasks)
    }

    /// Fire-and-forget write of the whole favorites list.
    fn persist_favorites(&self) -> Task<Message> {
        Task::perform(self.favorites.persist(), |result| {
            Message::PersistFinished(result.map_err(|e| e.to_string()))
        })
    }

    /// Kick off poster downloads for any movie that still lacks one.
    fn load_missing_posters(&self) -> Task<Message> {
        let pending: Vec<Movie> = self
            .movies
            .iter()
            .chain(self.favorites.movies())
            .filter(|m| !m.poster_path.is_empty() && !self.posters.contains_key(&m.id))
            .cloned()
            .collect();

        Task::batch(pending.into_iter().map(|movie| {
            let id = movie.id;
            let http = self.http.clone();
            Task::perform(poster::fetch_poster(http, movie), move |handle| {
                Message::PosterLoaded(id, handle)
            })
        }))
    }

    /// Subscribe to window events, plus frame ticks while cards animate.
    pub fn subscription(&self) -> Subscription<Message> {
        let events = event::listen().map(Message::EventOccurred);
        if self.is_animating() {
            let frames = iced::time::every(std::time::Duration::from_millis(16))
                .map(Message::AnimationTick);
            Subscription::batch([events, frames])
        } else {
            events
        }
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        ui::render_main_view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Screen;
    use crate::storage::MemoryStore;
    use iced::Point;

    fn app() -> App {
        App::new(Arc::new(MemoryStore::new()))
    }

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: String::new(),
            vote_average: 6.5,
        }
    }

    fn drag_card(app: &mut App, id: i64, dx: f32) {
        let _ = app.update(Message::CardPressed(id));
        let _ = app.update(Message::CardMoved(id, Point::new(100.0, 300.0)));
        let _ = app.update(Message::CardMoved(id, Point::new(100.0 + dx, 300.0)));
        let _ = app.update(Message::CardReleased(id));
    }

    fn run_animation(app: &mut App, frames: u32) {
        let mut now = Instant::now();
        for _ in 0..frames {
            now += std::time::Duration::from_millis(16);
            let _ = app.update(Message::AnimationTick(now));
        }
    }

    #[test]
    fn swipe_past_threshold_commits_and_favorites_the_movie() {
        let mut app = app();
        app.viewport_width = 800.0;
        let _ = app.update(Message::MoviesFetched(vec![movie(1, "A"), movie(2, "B")]));

        drag_card(&mut app, 1, 0.5 * 800.0);
        assert!(app.is_animating());

        run_animation(&mut app, 30);
        assert!(app.favorites.contains(1));
        assert!(!app.movies.iter().any(|m| m.id == 1));
        assert!(app.movies.iter().any(|m| m.id == 2));
        assert!(!app.is_animating());
    }

    #[test]
    fn swipe_under_threshold_snaps_back_and_favorites_nothing() {
        let mut app = app();
        app.viewport_width = 800.0;
        let _ = app.update(Message::MoviesFetched(vec![movie(1, "A")]));

        drag_card(&mut app, 1, 0.29 * 800.0);
        run_animation(&mut app, 600);

        assert!(app.favorites.is_empty());
        assert_eq!(app.movies.len(), 1);
        assert!(!app.is_animating());
    }

    #[test]
    fn leftward_swipe_never_favorites() {
        let mut app = app();
        app.viewport_width = 800.0;
        let _ = app.update(Message::MoviesFetched(vec![movie(1, "A")]));

        drag_card(&mut app, 1, -700.0);
        run_animation(&mut app, 600);

        assert!(app.favorites.is_empty());
        assert_eq!(app.movies.len(), 1);
    }

    #[test]
    fn moves_for_a_different_card_are_ignored() {
        let mut app = app();
        let _ = app.update(Message::MoviesFetched(vec![movie(1, "A"), movie(2, "B")]));

        let _ = app.update(Message::CardPressed(1));
        let _ = app.update(Message::CardMoved(2, Point::new(50.0, 50.0)));
        assert!(!app.gestures.contains_key(&2));
    }

    #[test]
    fn release_without_press_is_a_noop() {
        let mut app = app();
        let _ = app.update(Message::MoviesFetched(vec![movie(1, "A")]));
        let _ = app.update(Message::CardReleased(1));
        assert!(!app.is_animating());
    }

    #[test]
    fn remove_favorite_updates_the_list() {
        let mut app = app();
        let _ = app.update(Message::FavoritesHydrated(vec![movie(1, "A"), movie(2, "B")]));
        let _ = app.update(Message::RemoveFavorite(1));

        let ids: Vec<_> = app.favorites.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, [2]);
    }

    #[test]
    fn tab_selection_switches_screens() {
        let mut app = app();
        assert_eq!(app.screen, Screen::Home);
        let _ = app.update(Message::TabSelected(Screen::Favorites));
        assert_eq!(app.screen, Screen::Favorites);
    }

    #[test]
    fn commit_for_a_vanished_card_is_dropped() {
        let mut app = app();
        app.viewport_width = 800.0;
        let _ = app.update(Message::MoviesFetched(vec![movie(1, "A")]));

        drag_card(&mut app, 1, 500.0);
        // Candidate list is replaced mid-animation; the stale commit must
        // not favorite anything.
        let _ = app.update(Message::MoviesFetched(Vec::new()));
        run_animation(&mut app, 30);

        assert!(app.favorites.is_empty());
    }
}
