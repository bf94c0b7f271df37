//! Movie catalog client for the TMDB popular-movies endpoint.
//!
//! Single best-effort fetch per screen load: no retry, no pagination, no
//! caching. Every failure mode degrades to an empty list so the UI never
//! sees an error from here.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::model::Movie;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Envelope of the popular-movies response; only `results` matters.
#[derive(Debug, Deserialize)]
struct PopularResponse {
    results: Vec<Movie>,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, api_key: &str, language: &str) -> Self {
        CatalogClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: language.to_string(),
        }
    }

    /// Client configured from `TMDB_API_KEY` and optional `TMDB_LANGUAGE`.
    ///
    /// A missing key is not fatal here; the fetch will fail and degrade to
    /// an empty list like any other catalog error.
    pub fn from_env() -> Self {
        let api_key = std::env::var("TMDB_API_KEY").unwrap_or_else(|_| {
            log::warn!("TMDB_API_KEY is not set; the movie list will be empty");
            String::new()
        });
        let language =
            std::env::var("TMDB_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());
        CatalogClient::new(DEFAULT_BASE_URL, &api_key, &language)
    }

    /// Fetch the first page of popular movies.
    ///
    /// Any failure (connect, non-2xx status, decode) yields an empty list;
    /// the error is logged, never propagated.
    pub async fn fetch_popular(&self) -> Vec<Movie> {
        match self.try_fetch_popular().await {
            Ok(movies) => {
                log::info!("fetched {} popular movies", movies.len());
                movies
            }
            Err(e) => {
                log::error!("failed to fetch popular movies: {e}");
                Vec::new()
            }
        }
    }

    async fn try_fetch_popular(&self) -> Result<Vec<Movie>, CatalogError> {
        let mut url = Url::parse(&format!("{}/movie/popular", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("language", &self.language)
            .append_pair("page", "1");

        let response = self.http.get(url).send().await?.error_for_status()?;
        let body: PopularResponse = response.json().await?;
        Ok(body.results)
    }
}
