// Adapters layer: concrete implementations for external systems (storage, http, clipboard).

#[cfg(feature = "cli")]
pub mod clipboard;
pub mod omdb;
pub mod storage;
