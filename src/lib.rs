pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};

#[cfg(feature = "cli")]
pub use crate::adapters::clipboard::SystemClipboard;

pub use crate::adapters::{omdb::OmdbClient, storage::LocalStorage};
pub use crate::config::AppConfig;
pub use crate::core::{app::NominationApp, Movie, NominationList};
pub use crate::utils::error::{Result, ShoppiesError};
