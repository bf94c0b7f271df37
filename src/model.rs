use serde::{Deserialize, Serialize};

/// Base URL for TMDB poster images.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Width descriptor appended to the image base URL.
const POSTER_WIDTH: &str = "w500";

/// A movie record from the remote catalog.
///
/// Supplied by TMDB and treated as read-only; `id` is the stable key used
/// for favorites uniqueness. Unknown response fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    /// Full displayable URL for this movie's poster.
    pub fn poster_url(&self) -> String {
        poster_url(&self.poster_path)
    }
}

/// Combine a relative poster path with the fixed image base and width.
///
/// Pure string composition; TMDB poster paths come with a leading slash.
pub fn poster_url(poster_path: &str) -> String {
    format!("{IMAGE_BASE_URL}{POSTER_WIDTH}{poster_path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_url_joins_base_width_and_path() {
        assert_eq!(
            poster_url("/abc123.jpg"),
            "https://image.tmdb.org/t/p/w500/abc123.jpg"
        );
    }

    #[test]
    fn movie_deserializes_from_catalog_record() {
        let raw = r#"{
            "id": 550,
            "title": "Fight Club",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "vote_average": 8.4,
            "overview": "ignored extra field"
        }"#;
        let movie: Movie = serde_json::from_str(raw).unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.title, "Fight Club");
        assert_eq!(
            movie.poster_url(),
            "https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        );
    }

    #[test]
    fn movie_tolerates_missing_poster_and_rating() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();
        assert_eq!(movie.poster_path, "");
        assert_eq!(movie.vote_average, 0.0);
    }
}
