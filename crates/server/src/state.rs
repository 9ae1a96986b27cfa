use std::sync::Arc;

use cinepaw_metadata::aggregate::ResultAggregator;

use crate::view::SearchView;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<ResultAggregator>,
    pub view: Arc<SearchView>,
}

impl AppState {
    pub fn new(aggregator: ResultAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            view: Arc::new(SearchView::new()),
        }
    }
}
