pub mod app;
pub mod nominations;
pub mod search;
pub mod share;
pub mod view;

pub use crate::domain::model::{
    ApiMovie, LookupResponse, Movie, NominationList, SearchResponse, MAX_NOMINATIONS,
    NOMINATIONS_KEY,
};
pub use crate::domain::ports::{Clipboard, ConfigProvider, MovieCatalog, Storage};
pub use crate::utils::error::Result;
