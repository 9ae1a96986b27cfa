//! OMDb (Open Movie Database) provider client.
//!
//! Uses the single-endpoint OMDb API: https://www.omdbapi.com/

use cinepaw_core::types::{DetailStatus, MovieDetail, SearchHit};
use tracing::debug;

use crate::provider::{MovieLookupService, SearchPage, TitleQuery};
use crate::{LookupError, OmdbConfig, SearchError};

/// Value OMDb uses for every empty field.
const NOT_AVAILABLE: &str = "N/A";

pub struct OmdbClient {
    config: OmdbConfig,
    client: reqwest::Client,
}

impl OmdbClient {
    /// Fails with [`SearchError::Configuration`] when the API key is unusable.
    pub fn new(config: OmdbConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<serde_json::Value, LookupError> {
        let mut all_params = vec![("apikey", self.config.api_key.as_str())];
        all_params.extend_from_slice(params);

        debug!(url = %self.config.base_url, ?params, "OMDb request");

        let resp = self
            .client
            .get(&self.config.base_url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| LookupError::Network(format!("Network error! {e}")))?;

        if !resp.status().is_success() {
            return Err(LookupError::Network(format!(
                "Network error! Status: {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| LookupError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MovieLookupService for OmdbClient {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn search_by_title(&self, query: &TitleQuery<'_>) -> Result<SearchPage, LookupError> {
        let mut params = vec![("s", query.title)];
        if let Some(year) = query.year {
            params.push(("y", year));
        }
        if let Some(media_type) = query.media_type {
            params.push(("type", media_type.as_str()));
        }

        let data = self.get_json(&params).await?;
        Ok(parse_search_page(&data))
    }

    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, LookupError> {
        let data = self
            .get_json(&[("i", id), ("plot", self.config.plot.as_str())])
            .await?;

        parse_movie_detail(id, &data)
    }
}

fn text(data: &serde_json::Value, key: &str) -> Option<String> {
    data[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != NOT_AVAILABLE)
        .map(|s| s.to_string())
}

fn list(data: &serde_json::Value, key: &str) -> Vec<String> {
    text(data, key)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

// Only absolute web URLs are usable as image sources.
fn poster(data: &serde_json::Value) -> Option<String> {
    text(data, "Poster").filter(|p| p.starts_with("http"))
}

fn is_success(data: &serde_json::Value) -> bool {
    data["Response"]
        .as_str()
        .is_some_and(|r| r.eq_ignore_ascii_case("true"))
}

fn parse_search_page(data: &serde_json::Value) -> SearchPage {
    let matches = data["Search"]
        .as_array()
        .map(|hits| {
            hits.iter()
                .filter_map(|h| {
                    Some(SearchHit {
                        id: text(h, "imdbID")?,
                        title: text(h, "Title").unwrap_or_else(|| "Unknown".to_string()),
                        year: text(h, "Year"),
                        media_type: text(h, "Type").and_then(|t| t.parse().ok()),
                        poster_url: poster(h),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    SearchPage {
        matches,
        ok: is_success(data),
        message: text(data, "Error"),
    }
}

fn parse_movie_detail(id: &str, data: &serde_json::Value) -> Result<MovieDetail, LookupError> {
    if !is_success(data) {
        return Err(LookupError::NotFound(
            text(data, "Error").unwrap_or_else(|| format!("no detail record for {id}")),
        ));
    }

    let title = text(data, "Title")
        .ok_or_else(|| LookupError::Provider(format!("detail record for {id} has no Title")))?;

    // Keep the identifier that was looked up so dedupe by hit id still holds.
    if let Some(upstream) = text(data, "imdbID")
        && upstream != id
    {
        debug!(requested = id, upstream = %upstream, "OMDb returned a different imdbID");
    }

    Ok(MovieDetail {
        id: id.to_string(),
        title,
        year: text(data, "Year"),
        media_type: text(data, "Type").and_then(|t| t.parse().ok()),
        poster_url: poster(data),
        rated: text(data, "Rated"),
        released: text(data, "Released"),
        genre: list(data, "Genre"),
        runtime: text(data, "Runtime"),
        languages: list(data, "Language"),
        imdb_rating: text(data, "imdbRating"),
        director: text(data, "Director"),
        writer: text(data, "Writer"),
        producer: text(data, "Production"),
        actors: list(data, "Actors"),
        plot: text(data, "Plot"),
        status: DetailStatus::Success,
    })
}
