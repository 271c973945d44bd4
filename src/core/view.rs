//! Text rendering of the app state.
//!
//! [`ViewModel`] is built from state alone and carries every flag the
//! renderer needs, so tests can assert on it without parsing output.

use crate::core::{Movie, NominationList, MAX_NOMINATIONS};
use std::fmt;
use std::time::{Duration, Instant};

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_COOLDOWN: Duration = Duration::from_secs(3);

/// Label and disabled flag of the share modal's copy button.
///
/// A successful copy disables the button for [`COPY_COOLDOWN`]; the revert
/// cannot be cut short, and a click while disabled is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyButton {
    disabled_until: Option<Instant>,
}

impl CopyButton {
    /// Returns false when the button was still disabled at `now`.
    pub fn click(&mut self, now: Instant) -> bool {
        if self.is_disabled(now) {
            return false;
        }
        self.disabled_until = Some(now + COPY_COOLDOWN);
        true
    }

    pub fn is_disabled(&self, now: Instant) -> bool {
        self.disabled_until.is_some_and(|until| now < until)
    }

    pub fn label(&self, now: Instant) -> &'static str {
        if self.is_disabled(now) {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }
}

/// Everything the View reads.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub search_input: String,
    pub search_results: Vec<Movie>,
    pub api_error: String,
    pub share_modal_open: bool,
    pub shared_list_modal_open: bool,
    pub shared_movies: Vec<Movie>,
    pub copy_button: CopyButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub movie: Movie,
    pub nominate_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsPanel {
    Prompt,
    Error(String),
    Results { query: String, rows: Vec<ResultRow> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareModal {
    pub url: String,
    pub copy_label: &'static str,
    pub copy_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub search_input: String,
    pub results: ResultsPanel,
    pub nominations: Vec<Movie>,
    pub remaining: usize,
    pub show_share_button: bool,
    pub share_modal: Option<ShareModal>,
    pub shared_list: Option<Vec<Movie>>,
}

impl ViewModel {
    /// `share_url` is only read while the share modal is open.
    pub fn build(
        state: &AppState,
        nominations: &NominationList,
        share_url: impl FnOnce() -> String,
        now: Instant,
    ) -> Self {
        let results = if state.search_results.is_empty() {
            if state.search_input.is_empty() {
                ResultsPanel::Prompt
            } else {
                ResultsPanel::Error(state.api_error.clone())
            }
        } else {
            ResultsPanel::Results {
                query: state.search_input.clone(),
                rows: state
                    .search_results
                    .iter()
                    .map(|movie| ResultRow {
                        movie: movie.clone(),
                        nominate_enabled: nominations.can_nominate(movie),
                    })
                    .collect(),
            }
        };

        let show_share_button = nominations.is_full();
        let share_modal = (show_share_button && state.share_modal_open).then(|| ShareModal {
            url: share_url(),
            copy_label: state.copy_button.label(now),
            copy_disabled: state.copy_button.is_disabled(now),
        });

        Self {
            search_input: state.search_input.clone(),
            results,
            nominations: nominations.as_slice().to_vec(),
            remaining: nominations.remaining(),
            show_share_button,
            share_modal,
            shared_list: state
                .shared_list_modal_open
                .then(|| state.shared_movies.clone()),
        }
    }
}

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The Shoppies")?;
        writeln!(f, "Movie Title: {}", self.search_input)?;
        writeln!(f)?;

        match &self.results {
            ResultsPanel::Prompt => {
                writeln!(f, "Results")?;
                writeln!(f, "  Type in the search box above!")?;
            }
            ResultsPanel::Error(message) => {
                writeln!(f, "Results")?;
                writeln!(f, "  {}", message)?;
            }
            ResultsPanel::Results { query, rows } => {
                writeln!(f, "Results for \"{}\"", query)?;
                for row in rows {
                    let action = if row.nominate_enabled {
                        "[Nominate]"
                    } else {
                        "[--------]"
                    };
                    writeln!(f, "  {} {}  <{}>", action, row.movie, row.movie.id)?;
                }
            }
        }
        writeln!(f)?;

        if self.remaining > 0 {
            writeln!(f, "Nominations ({} left)", self.remaining)?;
        } else {
            writeln!(f, "Nominations")?;
            writeln!(f, "  You have nominated all {} movies! [Share List]", MAX_NOMINATIONS)?;
        }
        for movie in &self.nominations {
            writeln!(f, "  [Remove] {}  <{}>", movie, movie.id)?;
        }

        if let Some(modal) = &self.share_modal {
            writeln!(f)?;
            writeln!(f, "Share Your Nominated Movies")?;
            let button = if modal.copy_disabled {
                format!("({})", modal.copy_label)
            } else {
                format!("[{}]", modal.copy_label)
            };
            writeln!(f, "  {} {}", modal.url, button)?;
        }

        if let Some(shared) = &self.shared_list {
            writeln!(f)?;
            writeln!(f, "The Person Who Sent This Link Has Nominated:")?;
            for movie in shared {
                writeln!(f, "  {}", movie)?;
            }
        }

        Ok(())
    }
}
