use crate::core::{Movie, MovieCatalog, NominationList};
use crate::utils::error::{Result, ShoppiesError};
use std::sync::Arc;
use tokio::task::JoinSet;
use url::{form_urlencoded, Url};

/// Query parameter carrying the shared ids.
pub const LIST_PARAM: &str = "list";

/// Turns a nomination list into a link and a link back into movies.
#[derive(Debug, Clone)]
pub struct ShareLinkCodec {
    origin: String,
}

impl ShareLinkCodec {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// `<origin>?list=<JSON array of ids>`, with the JSON percent-encoded.
    pub fn encode(&self, list: &NominationList) -> Result<String> {
        let ids = serde_json::to_string(&list.ids())?;
        let mut url = Url::parse(&self.origin)?;
        url.query_pairs_mut().clear().append_pair(LIST_PARAM, &ids);
        Ok(url.into())
    }

    /// Extracts the id array from a full URL or a bare query string.
    ///
    /// `Ok(None)` when there is no `list` parameter at all. The raw,
    /// unencoded form (`?list=["tt1","tt2"]`) is accepted too.
    pub fn decode_ids(page_url: &str) -> Result<Option<Vec<String>>> {
        let query = match Url::parse(page_url) {
            Ok(url) => url.query().unwrap_or_default().to_string(),
            Err(_) => page_url.trim_start_matches('?').to_string(),
        };

        let Some(raw) = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| *key == LIST_PARAM)
            .map(|(_, value)| value.into_owned())
        else {
            return Ok(None);
        };

        serde_json::from_str::<Vec<String>>(&raw)
            .map(Some)
            .map_err(|e| ShoppiesError::InvalidSharedList {
                message: e.to_string(),
            })
    }

    /// Looks every id up concurrently. Unresolvable ids are dropped; the
    /// survivors keep the order of `ids`.
    pub async fn resolve<C>(catalog: Arc<C>, ids: Vec<String>) -> Vec<Movie>
    where
        C: MovieCatalog + 'static,
    {
        let mut lookups = JoinSet::new();
        for (index, id) in ids.into_iter().enumerate() {
            let catalog = Arc::clone(&catalog);
            lookups.spawn(async move {
                let resolved = match catalog.lookup(&id).await {
                    Ok(response) => {
                        let error = response.error.clone();
                        let movie = response.into_movie();
                        if movie.is_none() {
                            tracing::debug!(
                                "Shared id {} did not resolve: {}",
                                id,
                                error.unwrap_or_default()
                            );
                        }
                        movie
                    }
                    Err(e) => {
                        tracing::debug!("Lookup of shared id {} failed: {}", id, e);
                        None
                    }
                };
                (index, resolved)
            });
        }

        let mut resolved = Vec::new();
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((index, Some(movie))) => resolved.push((index, movie)),
                Ok((_, None)) => {}
                Err(e) => tracing::debug!("Shared id lookup task failed: {}", e),
            }
        }

        resolved.sort_by_key(|(index, _)| *index);
        resolved.into_iter().map(|(_, movie)| movie).collect()
    }

    /// Startup path for a received link. `None` when the page carries no list
    /// or the list cannot be parsed; parse failures are logged, not raised.
    pub async fn decode<C>(page_url: &str, catalog: Arc<C>) -> Option<Vec<Movie>>
    where
        C: MovieCatalog + 'static,
    {
        match Self::decode_ids(page_url) {
            Ok(Some(ids)) => {
                tracing::info!("Resolving {} shared ids", ids.len());
                Some(Self::resolve(catalog, ids).await)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("No list shared: {}", e);
                None
            }
        }
    }
}
