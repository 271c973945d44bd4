use crate::core::{Movie, NominationList, Storage, MAX_NOMINATIONS, NOMINATIONS_KEY};
use crate::utils::error::{Result, ShoppiesError};

/// Owns the nomination list and mirrors every change into [`Storage`].
pub struct NominationStore<S: Storage> {
    storage: S,
    list: NominationList,
}

impl<S: Storage> NominationStore<S> {
    /// Restores the persisted list. Never fails: anything unreadable starts
    /// an empty list.
    pub async fn load(storage: S) -> Self {
        let list = match storage.get_item(NOMINATIONS_KEY).await {
            Ok(Some(raw)) => parse_stored(&raw),
            Ok(None) => NominationList::new(),
            Err(e) => {
                tracing::warn!("Could not read saved nominations: {}", e);
                NominationList::new()
            }
        };

        tracing::debug!("Loaded {} saved nominations", list.len());
        Self { storage, list }
    }

    pub fn list(&self) -> &NominationList {
        &self.list
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list.contains(id)
    }

    pub fn is_full(&self) -> bool {
        self.list.is_full()
    }

    pub fn remaining(&self) -> usize {
        self.list.remaining()
    }

    pub fn can_nominate(&self, movie: &Movie) -> bool {
        self.list.can_nominate(movie)
    }

    /// Appends `movie` and persists. Rejects a full list or a repeated id.
    pub async fn nominate(&mut self, movie: Movie) -> Result<&NominationList> {
        if self.list.is_full() {
            return Err(ShoppiesError::NominationsFull {
                max: MAX_NOMINATIONS,
            });
        }
        if self.list.contains(&movie.id) {
            return Err(ShoppiesError::AlreadyNominated { id: movie.id });
        }

        tracing::info!("Nominated {} ({})", movie, movie.id);
        self.list.push(movie);
        self.persist().await;
        Ok(&self.list)
    }

    pub async fn remove(&mut self, id: &str) -> &NominationList {
        self.list.retain_without(id);
        tracing::info!("Removed nomination {}", id);
        self.persist().await;
        &self.list
    }

    /// Overwrites the stored copy with the full in-memory list. Failures are
    /// logged only; the in-memory list stays as it is.
    pub async fn persist(&self) {
        let serialized = match serde_json::to_string(&self.list) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Could not save nominated movies: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set_item(NOMINATIONS_KEY, &serialized).await {
            tracing::error!("Could not save nominated movies: {}", e);
        }
    }
}

fn parse_stored(raw: &str) -> NominationList {
    match serde_json::from_str::<Vec<Movie>>(raw) {
        Ok(movies) => {
            let stored = movies.len();
            let list = NominationList::from_movies_lossy(movies);
            if list.len() != stored {
                tracing::warn!(
                    "Saved nominations held {} entries, kept {} unique",
                    stored,
                    list.len()
                );
            }
            list
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed saved nominations: {}", e);
            NominationList::new()
        }
    }
}
