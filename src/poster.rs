//! Best-effort poster image download.
//!
//! Posters are pure decoration: a failed download logs and leaves the card
//! with its text-only placeholder. Nothing here retries or caches.

use iced::widget::image;

use crate::model::Movie;

/// Download the poster for `movie`, if it has one.
///
/// Returns `None` on any failure or when the movie carries no poster path.
pub async fn fetch_poster(http: reqwest::Client, movie: Movie) -> Option<image::Handle> {
    if movie.poster_path.is_empty() {
        return None;
    }
    let url = movie.poster_url();
    match try_fetch(&http, &url).await {
        Ok(bytes) => Some(image::Handle::from_bytes(bytes)),
        Err(e) => {
            log::warn!("failed to load poster for '{}': {e}", movie.title);
            None
        }
    }
}

async fn try_fetch(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = http.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
