use crate::core::{Movie, MovieCatalog, SearchResponse};
use crate::utils::error::Result;
use std::sync::Arc;

/// What one search resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Movie-typed results, in catalog order.
    Found(Vec<Movie>),
    /// The catalog answered `Response: "False"` with this message.
    Rejected(String),
}

pub struct SearchController<C: MovieCatalog> {
    catalog: Arc<C>,
}

impl<C: MovieCatalog> SearchController<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Queries the catalog with `query` as typed, empty input included.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let response = self.catalog.search(query).await?;
        let outcome = map_search_response(response);

        match &outcome {
            SearchOutcome::Found(movies) => {
                tracing::debug!("Search {:?} matched {} movies", query, movies.len())
            }
            SearchOutcome::Rejected(error) => {
                tracing::debug!("Search {:?} rejected: {}", query, error)
            }
        }

        Ok(outcome)
    }
}

pub fn map_search_response(response: SearchResponse) -> SearchOutcome {
    if response.ok {
        SearchOutcome::Found(
            response
                .search
                .into_iter()
                .filter(|entry| entry.is_movie())
                .map(Movie::from)
                .collect(),
        )
    } else {
        SearchOutcome::Rejected(response.error.unwrap_or_default())
    }
}
