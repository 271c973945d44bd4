use crate::core::nominations::NominationStore;
use crate::core::search::{SearchController, SearchOutcome};
use crate::core::share::ShareLinkCodec;
use crate::core::view::{AppState, ViewModel};
use crate::core::{Clipboard, Movie, MovieCatalog, NominationList, Storage};
use crate::utils::error::{Result, ShoppiesError};
use std::sync::Arc;
use std::time::Instant;

/// Single owner of all app state. Every user action goes through one of
/// these methods; persistence happens inside the store on each mutation.
pub struct NominationApp<C: MovieCatalog + 'static, S: Storage> {
    catalog: Arc<C>,
    search: SearchController<C>,
    store: NominationStore<S>,
    codec: ShareLinkCodec,
    state: AppState,
}

impl<C: MovieCatalog + 'static, S: Storage> NominationApp<C, S> {
    /// Restores saved nominations and, when `page_url` carries a `list`
    /// parameter, resolves the shared list before returning.
    pub async fn start(
        catalog: C,
        storage: S,
        origin: impl Into<String>,
        page_url: Option<&str>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let store = NominationStore::load(storage).await;
        let mut app = Self {
            search: SearchController::new(Arc::clone(&catalog)),
            catalog,
            store,
            codec: ShareLinkCodec::new(origin),
            state: AppState::default(),
        };

        if let Some(page_url) = page_url {
            app.receive_shared_link(page_url).await;
        }
        app
    }

    pub async fn receive_shared_link(&mut self, page_url: &str) {
        if let Some(movies) = ShareLinkCodec::decode(page_url, Arc::clone(&self.catalog)).await {
            if !movies.is_empty() {
                self.state.shared_list_modal_open = true;
            }
            self.state.shared_movies.extend(movies);
        }
    }

    /// Records `input` and replaces the results with what the catalog returns.
    ///
    /// A transport failure clears the results and shows a short message in
    /// place of the API's error text before the error is returned.
    pub async fn handle_search_change(&mut self, input: &str) -> Result<()> {
        self.state.search_input = input.to_string();

        match self.search.search(input).await {
            Ok(SearchOutcome::Found(movies)) => {
                self.state.search_results = movies;
                Ok(())
            }
            Ok(SearchOutcome::Rejected(error)) => {
                self.state.search_results.clear();
                self.state.api_error = error;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", input, e);
                self.state.search_results.clear();
                self.state.api_error = e.user_friendly_message();
                Err(e)
            }
        }
    }

    /// Nominates one of the current search results.
    pub async fn nominate(&mut self, id: &str) -> Result<&NominationList> {
        let movie = self
            .state
            .search_results
            .iter()
            .find(|movie| movie.id == id)
            .cloned()
            .ok_or_else(|| ShoppiesError::NotInResults { id: id.to_string() })?;
        self.store.nominate(movie).await
    }

    pub async fn nominate_movie(&mut self, movie: Movie) -> Result<&NominationList> {
        self.store.nominate(movie).await
    }

    /// Resolves `id` against the catalog and nominates it.
    pub async fn nominate_by_lookup(&mut self, id: &str) -> Result<&NominationList> {
        let response = self.catalog.lookup(id).await?;
        let error = response.error.clone();
        let movie = response
            .into_movie()
            .ok_or_else(|| ShoppiesError::UnknownMovie {
                id: id.to_string(),
                message: error.unwrap_or_default(),
            })?;
        self.store.nominate(movie).await
    }

    pub async fn remove(&mut self, id: &str) -> &NominationList {
        self.store.remove(id).await
    }

    /// The share modal exists only once the list is full.
    pub fn open_share_modal(&mut self) -> bool {
        self.state.share_modal_open = self.store.is_full();
        self.state.share_modal_open
    }

    pub fn close_share_modal(&mut self) {
        self.state.share_modal_open = false;
    }

    pub fn close_shared_list_modal(&mut self) {
        self.state.shared_list_modal_open = false;
    }

    /// Derived from the live list on every call.
    pub fn share_url(&self) -> Result<String> {
        self.codec.encode(self.store.list())
    }

    /// Copies the share link. Returns `Ok(false)` while the copy button is
    /// still in its cooldown.
    pub fn copy_share_url<K: Clipboard>(&mut self, clipboard: &mut K, now: Instant) -> Result<bool> {
        if self.state.copy_button.is_disabled(now) {
            return Ok(false);
        }
        let url = self.share_url()?;
        clipboard.write_text(&url)?;
        Ok(self.state.copy_button.click(now))
    }

    pub fn view(&self, now: Instant) -> ViewModel {
        let share_url = || {
            self.share_url().unwrap_or_else(|e| {
                tracing::error!("Could not build share link: {}", e);
                String::new()
            })
        };
        ViewModel::build(&self.state, self.store.list(), share_url, now)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn nominations(&self) -> &NominationList {
        self.store.list()
    }

    pub fn search_results(&self) -> &[Movie] {
        &self.state.search_results
    }

    pub fn shared_movies(&self) -> &[Movie] {
        &self.state.shared_movies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::{ResultsPanel, COPIED_LABEL, COPY_LABEL};
    use crate::core::{LookupResponse, SearchResponse};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::Mutex;

    struct FakeCatalog {
        by_query: HashMap<String, Vec<Movie>>,
        fail_all: bool,
    }

    #[async_trait]
    impl MovieCatalog for FakeCatalog {
        async fn search(&self, query: &str) -> Result<SearchResponse> {
            if self.fail_all {
                return Err(ShoppiesError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )));
            }
            let response = match self.by_query.get(query) {
                Some(movies) => SearchResponse {
                    ok: true,
                    search: movies
                        .iter()
                        .map(|movie| crate::core::ApiMovie {
                            title: movie.title.clone(),
                            year: movie.release_year.clone(),
                            imdb_id: movie.id.clone(),
                            kind: "movie".to_string(),
                        })
                        .collect(),
                    error: None,
                },
                None => SearchResponse {
                    ok: false,
                    search: vec![],
                    error: Some("Movie not found!".to_string()),
                },
            };
            Ok(response)
        }

        async fn lookup(&self, id: &str) -> Result<LookupResponse> {
            let movie = self.by_query.values().flatten().find(|movie| movie.id == id);
            Ok(LookupResponse {
                ok: movie.is_some(),
                title: movie.map(|m| m.title.clone()),
                year: movie.map(|m| m.release_year.clone()),
                imdb_id: movie.map(|m| m.id.clone()),
                error: movie.is_none().then(|| "Incorrect IMDb ID.".to_string()),
            })
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStorage {
        items: Arc<Mutex<HashMap<String, String>>>,
    }

    impl Storage for MemoryStorage {
        async fn get_item(&self, key: &str) -> Result<Option<String>> {
            Ok(self.items.lock().await.get(key).cloned())
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<()> {
            self.items
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn catalog() -> FakeCatalog {
        let movies = (1..=6)
            .map(|i| Movie::new(format!("tt{}", i), format!("Heist {}", i), "1995"))
            .collect();
        FakeCatalog {
            by_query: HashMap::from([("Heist".to_string(), movies)]),
            fail_all: false,
        }
    }

    async fn app() -> NominationApp<FakeCatalog, MemoryStorage> {
        NominationApp::start(catalog(), MemoryStorage::default(), "http://localhost:3000", None)
            .await
    }

    #[tokio::test]
    async fn test_rejected_search_clears_results_and_shows_error() {
        let mut app = app().await;
        app.handle_search_change("Heist").await.unwrap();
        assert_eq!(app.search_results().len(), 6);

        app.handle_search_change("Nothing").await.unwrap();

        assert!(app.search_results().is_empty());
        assert_eq!(
            app.view(Instant::now()).results,
            ResultsPanel::Error("Movie not found!".to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_transient_message() {
        let failing = FakeCatalog {
            by_query: HashMap::new(),
            fail_all: true,
        };
        let mut app =
            NominationApp::start(failing, MemoryStorage::default(), "http://localhost:3000", None)
                .await;

        let result = app.handle_search_change("Heist").await;

        assert!(result.is_err());
        assert!(app.search_results().is_empty());
        assert!(!app.state().api_error.is_empty());
    }

    #[tokio::test]
    async fn test_nominate_requires_search_result() {
        let mut app = app().await;
        let result = app.nominate("tt1").await;
        assert!(matches!(result, Err(ShoppiesError::NotInResults { .. })));

        app.handle_search_change("Heist").await.unwrap();
        app.nominate("tt1").await.unwrap();
        assert!(app.nominations().contains("tt1"));
    }

    #[tokio::test]
    async fn test_share_modal_and_copy_cooldown() {
        let mut app = app().await;
        app.handle_search_change("Heist").await.unwrap();
        assert!(!app.open_share_modal());

        for n in 1..=5 {
            app.nominate(&format!("tt{}", n)).await.unwrap();
        }
        assert!(app.open_share_modal());

        let mut clipboard = RecordingClipboard::default();
        let start = Instant::now();
        assert!(app.copy_share_url(&mut clipboard, start).unwrap());
        assert!(!app
            .copy_share_url(&mut clipboard, start + Duration::from_secs(1))
            .unwrap());
        assert_eq!(clipboard.copied.len(), 1);
        assert_eq!(
            ShareLinkCodec::decode_ids(&clipboard.copied[0]).unwrap().unwrap(),
            vec!["tt1", "tt2", "tt3", "tt4", "tt5"]
        );

        let modal = app.view(start + Duration::from_secs(1)).share_modal.unwrap();
        assert_eq!(modal.copy_label, COPIED_LABEL);
        let modal = app.view(start + Duration::from_secs(3)).share_modal.unwrap();
        assert_eq!(modal.copy_label, COPY_LABEL);
    }

    #[tokio::test]
    async fn test_modals_close_and_direct_nomination() {
        let mut app = NominationApp::start(
            catalog(),
            MemoryStorage::default(),
            "http://localhost:3000",
            Some(r#"?list=["tt1"]"#),
        )
        .await;
        assert!(app.view(Instant::now()).shared_list.is_some());
        app.close_shared_list_modal();
        assert!(app.view(Instant::now()).shared_list.is_none());

        for n in 1..=5 {
            app.nominate_movie(Movie::new(format!("tt{}", n), "Direct", "2001"))
                .await
                .unwrap();
        }
        assert!(app.open_share_modal());
        app.close_share_modal();
        assert!(app.view(Instant::now()).share_modal.is_none());
    }

    #[tokio::test]
    async fn test_share_url_tracks_live_list() {
        let mut app = app().await;
        app.handle_search_change("Heist").await.unwrap();
        app.nominate("tt2").await.unwrap();
        let before = app.share_url().unwrap();

        app.remove("tt2").await;
        let after = app.share_url().unwrap();

        assert_ne!(before, after);
        assert_eq!(ShareLinkCodec::decode_ids(&after).unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_start_with_shared_link_opens_modal() {
        let app = NominationApp::start(
            catalog(),
            MemoryStorage::default(),
            "http://localhost:3000",
            Some(r#"http://localhost:3000/?list=["tt3","tt404","tt1"]"#),
        )
        .await;

        assert!(app.state().shared_list_modal_open);
        let ids: Vec<&str> = app.shared_movies().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["tt3", "tt1"]);
    }

    #[tokio::test]
    async fn test_shared_link_with_no_resolvable_ids_keeps_modal_closed() {
        let app = NominationApp::start(
            catalog(),
            MemoryStorage::default(),
            "http://localhost:3000",
            Some(r#"?list=["tt404"]"#),
        )
        .await;

        assert!(!app.state().shared_list_modal_open);
        assert!(app.shared_movies().is_empty());
    }
}
