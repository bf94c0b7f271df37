use std::time::Instant;

use iced::widget::image;
use iced::{Event, Point};

use crate::model::Movie;
use crate::state::Screen;

#[derive(Debug, Clone)]
pub enum Message {
    MoviesFetched(Vec<Movie>),
    FavoritesHydrated(Vec<Movie>),
    PersistFinished(Result<(), String>),
    PosterLoaded(i64, Option<image::Handle>),
    TabSelected(Screen),
    CardPressed(i64),
    CardMoved(i64, Point),
    CardReleased(i64),
    RemoveFavorite(i64),
    AnimationTick(Instant),
    EventOccurred(Event),
}
