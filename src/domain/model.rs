use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

/// Upper bound on the nomination list.
pub const MAX_NOMINATIONS: usize = 5;

/// Storage key the nomination list is mirrored under.
pub const NOMINATIONS_KEY: &str = "nominatedMovies";

/// A catalog entry as the app sees it. Identity is `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub release_year: String,
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        release_year: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_year: release_year.into(),
        }
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.release_year)
    }
}

/// Ordered, id-unique list of at most [`MAX_NOMINATIONS`] movies.
///
/// Only [`crate::core::nominations::NominationStore`] mutates it, so the
/// bound and uniqueness are checked in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NominationList {
    movies: Vec<Movie>,
}

impl NominationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from arbitrary input, dropping later duplicates and
    /// anything past the bound.
    pub fn from_movies_lossy(movies: Vec<Movie>) -> Self {
        let mut list = Self::new();
        for movie in movies {
            if list.is_full() {
                break;
            }
            if !list.contains(&movie.id) {
                list.movies.push(movie);
            }
        }
        list
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.movies.len() >= MAX_NOMINATIONS
    }

    pub fn remaining(&self) -> usize {
        MAX_NOMINATIONS.saturating_sub(self.movies.len())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.movies.iter().any(|movie| movie.id == id)
    }

    pub fn can_nominate(&self, movie: &Movie) -> bool {
        !self.is_full() && !self.contains(&movie.id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.movies.iter().map(|movie| movie.id.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    pub fn as_slice(&self) -> &[Movie] {
        &self.movies
    }

    pub(crate) fn push(&mut self, movie: Movie) {
        self.movies.push(movie);
    }

    pub(crate) fn retain_without(&mut self, id: &str) {
        self.movies.retain(|movie| movie.id != id);
    }
}

impl<'a> IntoIterator for &'a NominationList {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

/// One entry of an OMDb `Search` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
}

impl ApiMovie {
    pub fn is_movie(&self) -> bool {
        self.kind == "movie"
    }
}

impl From<ApiMovie> for Movie {
    fn from(api: ApiMovie) -> Self {
        Movie {
            id: api.imdb_id,
            title: api.title,
            release_year: api.year,
        }
    }
}

/// Body of `?s=<query>`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Response", deserialize_with = "deserialize_flag")]
    pub ok: bool,
    #[serde(rename = "Search", default)]
    pub search: Vec<ApiMovie>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// Body of `?i=<id>`. Fields are absent when `Response` is `"False"`.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    #[serde(rename = "Response", deserialize_with = "deserialize_flag")]
    pub ok: bool,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl LookupResponse {
    pub fn into_movie(self) -> Option<Movie> {
        if !self.ok {
            return None;
        }
        Some(Movie {
            id: self.imdb_id?,
            title: self.title?,
            release_year: self.year.unwrap_or_default(),
        })
    }
}

// OMDb reports success as the strings "True"/"False".
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.eq_ignore_ascii_case("true"))
}
