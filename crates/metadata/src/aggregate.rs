//! Search result aggregation.
//!
//! A search runs in two phases against the lookup service:
//! 1. One title search, whose failure aborts the whole search.
//! 2. One detail lookup per distinct identifier, all joined before filtering.
//!    A failed lookup only affects its own title.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use cinepaw_core::types::{MovieDetail, SearchCriteria, SearchHit};
use futures::future::join_all;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::provider::{MovieLookupService, TitleQuery};
use crate::{AggregatorConfig, FailurePolicy, LookupError, SearchError};

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

pub struct ResultAggregator {
    service: Arc<dyn MovieLookupService>,
    config: AggregatorConfig,
}

impl ResultAggregator {
    pub fn new(service: Arc<dyn MovieLookupService>, config: AggregatorConfig) -> Self {
        Self { service, config }
    }

    pub fn provider_name(&self) -> &str {
        self.service.name()
    }

    /// Run a search and return display-ready records in search order.
    ///
    /// An empty list is a valid outcome (everything was filtered out).
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<MovieDetail>, SearchError> {
        let title = criteria.trimmed_title();
        if title.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let year = criteria.year_filter();
        if let Some(y) = year
            && !YEAR_RE.is_match(y)
        {
            return Err(SearchError::InvalidYear(y.to_string()));
        }

        let query = TitleQuery {
            title,
            year,
            media_type: criteria.media_type,
        };
        info!(provider = self.service.name(), title, ?year, media_type = ?query.media_type, "searching");

        let page = match self.service.search_by_title(&query).await {
            Ok(page) => page,
            Err(LookupError::Network(msg)) => return Err(SearchError::Network(msg)),
            Err(e) => {
                warn!(title, error = %e, "title search returned an unusable response");
                return Err(SearchError::no_results_for(title));
            }
        };

        if !page.ok || page.matches.is_empty() {
            return Err(match page.message {
                Some(msg) => SearchError::NoResults(msg),
                None => SearchError::no_results_for(title),
            });
        }

        let total = page.matches.len();
        let hits = dedupe_hits(page.matches);
        debug!(total, unique = hits.len(), "deduplicated search hits");

        let details = self.fetch_all(&hits).await;
        let kept = filter_details(
            details,
            self.config.failure_policy,
            criteria.language_filter().as_deref(),
        );

        info!(title, unique = hits.len(), kept = kept.len(), "search complete");
        Ok(kept)
    }

    /// Fetch every hit concurrently. Always yields one record per hit, in order.
    async fn fetch_all(&self, hits: &[SearchHit]) -> Vec<MovieDetail> {
        let lookups = hits.iter().map(|hit| async move {
            match self.service.fetch_detail(&hit.id).await {
                Ok(mut detail) => {
                    // Records are keyed by the hit that produced them.
                    if detail.id != hit.id {
                        debug!(id = %hit.id, returned = %detail.id, "detail carried another id");
                        detail.id = hit.id.clone();
                    }
                    detail
                }
                Err(e) => {
                    warn!(id = %hit.id, error = %e, "detail lookup failed");
                    MovieDetail::failed(&hit.id)
                }
            }
        });
        join_all(lookups).await
    }
}

/// Keep the first hit for each identifier, preserving order.
pub fn dedupe_hits(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|h| seen.insert(h.id.clone()))
        .collect()
}

/// Apply the failure policy, then the (lower-cased) language filter.
pub fn filter_details(
    details: Vec<MovieDetail>,
    policy: FailurePolicy,
    language: Option<&str>,
) -> Vec<MovieDetail> {
    details
        .into_iter()
        .filter(|d| policy == FailurePolicy::Placeholder || d.is_success())
        .filter(|d| language.is_none_or(|lang| d.speaks(lang)))
        .collect()
}
