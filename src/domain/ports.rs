use crate::domain::model::{LookupResponse, SearchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key/value persistence, shaped after the browser's local storage.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The remote movie catalog.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse>;
    async fn lookup(&self, id: &str) -> Result<LookupResponse>;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn share_origin(&self) -> &str;
}
