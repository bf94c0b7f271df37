use iced::widget::{
    Space, button, center, column, container, image, mouse_area, row, scrollable, text,
};
use iced::{Color, Element, Length, Theme, alignment};

use crate::message::Message;
use crate::model::Movie;
use crate::state::{App, Screen};

const CARD_WIDTH: f32 = 300.0;
const POSTER_WIDTH: f32 = 100.0;
const POSTER_HEIGHT: f32 = 150.0;

fn header_color() -> Color {
    Color::from_rgb8(0xff, 0x45, 0x00)
}

fn rating_color() -> Color {
    Color::from_rgb8(0xff, 0xcc, 0x00)
}

/// Multiply a color's alpha, for the commit fade-out.
fn fade(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity,
        ..color
    }
}

/// Render the main view: tab bar on top, the active screen below.
pub fn render_main_view(app: &App) -> Element<'_, Message> {
    let body = match app.screen {
        Screen::Home => home_view(app),
        Screen::Favorites => favorites_view(app),
    };

    column![tab_bar(app), body]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Top tab bar with the status line on the right.
fn tab_bar(app: &App) -> Element<'_, Message> {
    let favorites_label = if app.favorites.is_empty() {
        "Favorites".to_string()
    } else {
        format!("Favorites ({})", app.favorites.movies().len())
    };

    container(
        row![
            text("ReelCine").size(20).color(header_color()),
            button(text("Home").size(14))
                .on_press(Message::TabSelected(Screen::Home))
                .padding(5),
            button(text(favorites_label).size(14))
                .on_press(Message::TabSelected(Screen::Favorites))
                .padding(5),
            container("").width(Length::Fill),
            text(app.status.clone()).size(12),
        ]
        .spacing(10)
        .align_y(alignment::Vertical::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .into()
}

/// Home screen: the swipeable candidate cards.
fn home_view(app: &App) -> Element<'_, Message> {
    if app.movies.is_empty() {
        return center(
            column![
                text("No movies to show").size(32),
                text(app.status.clone()).size(12),
            ]
            .spacing(20),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into();
    }

    let hint = text("Swipe a card right to favorite it").size(12);
    let cards: Vec<Element<'_, Message>> =
        app.movies.iter().map(|m| swipe_card(app, m)).collect();

    column![
        container(hint).center_x(Length::Fill).padding(5),
        scrollable(column(cards).spacing(10).width(Length::Fill)).height(Length::Fill),
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

/// One swipeable movie card, displaced and faded per its gesture state.
fn swipe_card<'a>(app: &'a App, movie: &'a Movie) -> Element<'a, Message> {
    let (dx, opacity) = app
        .gestures
        .get(&movie.id)
        .map(|g| (g.offset().0, g.opacity()))
        .unwrap_or((0.0, 1.0));

    let id = movie.id;
    let card = mouse_area(movie_card(app, movie, opacity))
        .on_press(Message::CardPressed(id))
        .on_move(move |point| Message::CardMoved(id, point))
        .on_release(Message::CardReleased(id))
        .on_exit(Message::CardReleased(id));

    displaced(card.into(), dx)
}

/// A centered row shifts by half the spacer imbalance, so the spacer is
/// doubled to move the card by exactly `dx`.
fn displaced(card: Element<'_, Message>, dx: f32) -> Element<'_, Message> {
    let lead = (2.0 * dx).max(0.0);
    let trail = (-2.0 * dx).max(0.0);
    container(row![
        Space::new().width(Length::Fixed(lead)),
        card,
        Space::new().width(Length::Fixed(trail)),
    ])
    .center_x(Length::Fill)
    .into()
}

/// The card itself: poster, title, rating.
fn movie_card<'a>(app: &'a App, movie: &'a Movie, opacity: f32) -> Element<'a, Message> {
    let details = column![
        text(&movie.title)
            .size(16)
            .color(fade(Color::WHITE, opacity)),
        text(format!("★ {:.1}", movie.vote_average))
            .size(14)
            .color(fade(rating_color(), opacity)),
    ]
    .spacing(4)
    .width(Length::Fill);

    container(
        row![poster(app, movie, opacity), details]
            .spacing(12)
            .align_y(alignment::Vertical::Center),
    )
    .padding(8)
    .width(Length::Fixed(CARD_WIDTH))
    .style(move |_theme: &Theme| container::Style {
        background: Some(fade(Color::from_rgb8(0x33, 0x33, 0x33), opacity).into()),
        border: iced::border::rounded(8),
        ..Default::default()
    })
    .into()
}

/// Poster image, or a dim placeholder while it loads (or never arrives).
fn poster<'a>(app: &'a App, movie: &'a Movie, opacity: f32) -> Element<'a, Message> {
    match app.posters.get(&movie.id) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(POSTER_WIDTH))
            .height(Length::Fixed(POSTER_HEIGHT))
            .opacity(opacity)
            .into(),
        None => container("")
            .width(Length::Fixed(POSTER_WIDTH))
            .height(Length::Fixed(POSTER_HEIGHT))
            .style(move |_theme: &Theme| container::Style {
                background: Some(fade(Color::from_rgb8(0x22, 0x22, 0x22), opacity).into()),
                border: iced::border::rounded(8),
                ..Default::default()
            })
            .into(),
    }
}

/// Favorites screen: saved cards with a remove button.
fn favorites_view(app: &App) -> Element<'_, Message> {
    if app.favorites.is_empty() {
        return center(text("No favorite movies yet").size(24))
            .width(Length::Fill)
            .height(Length::Fill)
            .into();
    }

    let rows: Vec<Element<'_, Message>> = app
        .favorites
        .movies()
        .iter()
        .map(|m| favorite_row(app, m))
        .collect();

    scrollable(
        column(rows)
            .spacing(10)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .height(Length::Fill)
    .into()
}

/// One favorited movie with its remove control.
fn favorite_row<'a>(app: &'a App, movie: &'a Movie) -> Element<'a, Message> {
    let details = column![
        text(&movie.title).size(16).color(Color::WHITE),
        text(format!("★ {:.1}", movie.vote_average))
            .size(14)
            .color(rating_color()),
    ]
    .spacing(4)
    .width(Length::Fill);

    container(
        row![
            poster(app, movie, 1.0),
            details,
            button(text("X").size(16))
                .on_press(Message::RemoveFavorite(movie.id))
                .padding(8),
        ]
        .spacing(12)
        .align_y(alignment::Vertical::Center),
    )
    .padding(8)
    .width(Length::Fixed(CARD_WIDTH))
    .style(|_theme: &Theme| container::Style {
        background: Some(Color::from_rgb8(0x33, 0x33, 0x33).into()),
        border: iced::border::rounded(8),
        ..Default::default()
    })
    .into()
}
