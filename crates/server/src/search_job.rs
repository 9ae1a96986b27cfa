use cinepaw_core::types::SearchCriteria;
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Start a tagged search in the background.
///
/// Returns the search id and a handle that resolves to whether the result was
/// published (it is not if a newer search started first).
pub async fn spawn_search(state: &AppState, criteria: SearchCriteria) -> (u64, JoinHandle<bool>) {
    let search_id = state.view.begin(criteria.clone()).await;

    let aggregator = state.aggregator.clone();
    let view = state.view.clone();
    let handle = tokio::spawn(async move {
        let outcome = aggregator.search(&criteria).await;
        if let Err(e) = &outcome {
            tracing::info!(search_id, error = %e, "search failed");
        }
        let published = view.publish(search_id, outcome).await;
        if !published {
            tracing::debug!(search_id, "search superseded before it finished");
        }
        published
    });

    (search_id, handle)
}
