use cinepaw_core::types::{MediaType, MovieDetail, SearchHit};

use crate::LookupError;

/// A movie database that can search by title and fetch full records.
#[async_trait::async_trait]
pub trait MovieLookupService: Send + Sync {
    fn name(&self) -> &str;

    /// Search for titles. Filters are applied upstream.
    async fn search_by_title(&self, query: &TitleQuery<'_>) -> Result<SearchPage, LookupError>;

    /// Get the full record for one identifier.
    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, LookupError>;
}

/// Parameters sent with a title search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleQuery<'a> {
    pub title: &'a str,
    pub year: Option<&'a str>,
    pub media_type: Option<MediaType>,
}

/// A well-formed title search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchPage {
    pub matches: Vec<SearchHit>,
    pub ok: bool,
    pub message: Option<String>,
}
