use cinepaw_core::types::{MovieDetail, SearchCriteria};
use cinepaw_metadata::SearchError;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

/// What the front end should currently show. Exactly one phase is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewPhase {
    Idle,
    Loading {
        criteria: SearchCriteria,
    },
    Ready {
        criteria: SearchCriteria,
        movies: Vec<MovieDetail>,
        /// Identifier shown in the detail view, if any.
        selected: Option<String>,
    },
    Failed {
        criteria: SearchCriteria,
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    /// Tag of the most recently started search; 0 before the first one.
    pub search_id: u64,
    /// Bumped on every change, including selection changes.
    pub revision: u64,
    pub updated_ts: i64,
    #[serde(flatten)]
    pub phase: ViewPhase,
}

impl ViewState {
    fn touch(&mut self) {
        self.revision += 1;
        self.updated_ts = chrono::Utc::now().timestamp();
    }
}

/// Presentation state shared by every request. Results from a search that has
/// been superseded by a newer one are discarded.
pub struct SearchView {
    state: Mutex<ViewState>,
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ViewState {
                search_id: 0,
                revision: 0,
                updated_ts: chrono::Utc::now().timestamp(),
                phase: ViewPhase::Idle,
            }),
        }
    }

    /// Tag a new search and switch to loading. Clears any selection.
    pub async fn begin(&self, criteria: SearchCriteria) -> u64 {
        let mut state = self.state.lock().await;
        state.search_id += 1;
        state.phase = ViewPhase::Loading { criteria };
        state.touch();
        state.search_id
    }

    /// Store the outcome of `search_id`. Returns `false` if a newer search
    /// has started in the meantime, in which case nothing changes.
    pub async fn publish(
        &self,
        search_id: u64,
        outcome: Result<Vec<MovieDetail>, SearchError>,
    ) -> bool {
        let mut state = self.state.lock().await;
        if state.search_id != search_id {
            debug!(search_id, latest = state.search_id, "discarding stale search result");
            return false;
        }

        let criteria = match &state.phase {
            ViewPhase::Loading { criteria } => criteria.clone(),
            _ => return false,
        };

        state.phase = match outcome {
            Ok(movies) => ViewPhase::Ready {
                criteria,
                movies,
                selected: None,
            },
            Err(e) => ViewPhase::Failed {
                criteria,
                error: e.to_string(),
            },
        };
        state.touch();
        true
    }

    /// Open the detail view for a record of the current result.
    pub async fn select(&self, id: &str) -> Option<MovieDetail> {
        let mut state = self.state.lock().await;
        let ViewPhase::Ready {
            movies, selected, ..
        } = &mut state.phase
        else {
            return None;
        };

        let movie = movies.iter().find(|m| m.id == id)?.clone();
        *selected = Some(movie.id.clone());
        state.touch();
        Some(movie)
    }

    pub async fn clear_selection(&self) {
        let mut state = self.state.lock().await;
        if let ViewPhase::Ready { selected, .. } = &mut state.phase
            && selected.take().is_some()
        {
            state.touch();
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinepaw_core::types::DetailStatus;

    fn movie(id: &str) -> MovieDetail {
        MovieDetail {
            title: format!("Movie {id}"),
            status: DetailStatus::Success,
            ..MovieDetail::failed(id)
        }
    }

    #[tokio::test]
    async fn starts_idle() {
        let view = SearchView::new();
        let snap = view.snapshot().await;
        assert_eq!(snap.search_id, 0);
        assert_eq!(snap.phase, ViewPhase::Idle);
    }

    #[tokio::test]
    async fn stale_result_never_overwrites_newer_search() {
        let view = SearchView::new();
        let first = view.begin(SearchCriteria::new("Alien")).await;
        let second = view.begin(SearchCriteria::new("Aliens")).await;

        assert!(view.publish(second, Ok(vec![movie("tt2")])).await);
        assert!(!view.publish(first, Ok(vec![movie("tt1")])).await);

        let snap = view.snapshot().await;
        assert_eq!(snap.search_id, second);
        match snap.phase {
            ViewPhase::Ready {
                criteria, movies, ..
            } => {
                assert_eq!(criteria.title, "Aliens");
                assert_eq!(movies[0].id, "tt2");
            }
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[tokio::test]
    async fn stale_result_is_dropped_while_newer_is_loading() {
        let view = SearchView::new();
        let first = view.begin(SearchCriteria::new("Alien")).await;
        let _second = view.begin(SearchCriteria::new("Aliens")).await;

        assert!(!view.publish(first, Ok(vec![movie("tt1")])).await);
        assert!(matches!(
            view.snapshot().await.phase,
            ViewPhase::Loading { .. }
        ));
    }

    #[tokio::test]
    async fn failure_is_stored_with_message() {
        let view = SearchView::new();
        let id = view.begin(SearchCriteria::new("  ")).await;
        assert!(view.publish(id, Err(SearchError::EmptyQuery)).await);

        let snap = view.snapshot().await;
        assert_eq!(
            snap.phase,
            ViewPhase::Failed {
                criteria: SearchCriteria::new("  "),
                error: "Please enter a search term.".into(),
            }
        );
    }

    #[tokio::test]
    async fn selection_follows_current_result() {
        let view = SearchView::new();
        assert!(view.select("tt1").await.is_none());

        let id = view.begin(SearchCriteria::new("x")).await;
        view.publish(id, Ok(vec![movie("tt1"), movie("tt2")])).await;

        assert!(view.select("tt9").await.is_none());
        assert_eq!(view.select("tt2").await.unwrap().id, "tt2");
        assert!(matches!(
            view.snapshot().await.phase,
            ViewPhase::Ready { selected: Some(ref s), .. } if s == "tt2"
        ));

        view.clear_selection().await;
        assert!(matches!(
            view.snapshot().await.phase,
            ViewPhase::Ready { selected: None, .. }
        ));

        view.begin(SearchCriteria::new("y")).await;
        assert!(view.select("tt2").await.is_none());
    }

    #[tokio::test]
    async fn closing_the_detail_view_is_a_visible_change() {
        let view = SearchView::new();
        let id = view.begin(SearchCriteria::new("x")).await;
        view.publish(id, Ok(vec![movie("tt1")])).await;
        view.select("tt1").await;

        let before = view.snapshot().await;
        view.clear_selection().await;
        let after = view.snapshot().await;
        assert!(after.revision > before.revision);
        assert!(after.updated_ts >= before.updated_ts);

        // Nothing selected: no change to report.
        view.clear_selection().await;
        assert_eq!(view.snapshot().await.revision, after.revision);
    }

    #[tokio::test]
    async fn snapshot_serializes_flat_status() {
        let view = SearchView::new();
        view.begin(SearchCriteria::new("Heat")).await;
        let json = serde_json::to_value(view.snapshot().await).unwrap();
        assert_eq!(json["status"], "loading");
        assert_eq!(json["search_id"], 1);
        assert_eq!(json["criteria"]["title"], "Heat");
    }
}
