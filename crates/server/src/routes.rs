use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use cinepaw_core::error::ApiError;
use cinepaw_core::types::{MediaType, MovieDetail, SearchCriteria};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;
use crate::view::ViewState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        // One-shot search, answered in the response
        .route("/search", get(search_now))
        // Tagged searches feeding the shared view
        .route("/searches", post(start_search))
        .route("/view", get(get_view))
        .route(
            "/view/selection",
            put(select_movie).delete(clear_selection),
        )
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    provider: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: state.aggregator.provider_name().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Raw search input as typed by the user. Blank fields count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub title: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub language: Option<String>,
}

impl SearchParams {
    pub fn into_criteria(self) -> Result<SearchCriteria, ApiError> {
        let media_type = match self.media_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) => Some(
                t.parse::<MediaType>()
                    .map_err(|_| ApiError::BadRequest(format!("unknown type \"{t}\"")))?,
            ),
        };

        Ok(SearchCriteria {
            title: self.title.unwrap_or_default(),
            year: self.year,
            media_type,
            language: self.language,
        })
    }
}

#[derive(Serialize)]
struct SearchResponse {
    movies: Vec<MovieDetail>,
}

async fn search_now(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let criteria = params.into_criteria()?;
    let movies = state.aggregator.search(&criteria).await?;
    Ok(Json(SearchResponse { movies }))
}

#[derive(Serialize)]
struct StartSearchResponse {
    search_id: u64,
}

async fn start_search(
    State(state): State<AppState>,
    Json(params): Json<SearchParams>,
) -> Result<(StatusCode, Json<StartSearchResponse>), AppError> {
    let criteria = params.into_criteria()?;
    let (search_id, _) = crate::search_job::spawn_search(&state, criteria).await;
    Ok((StatusCode::ACCEPTED, Json(StartSearchResponse { search_id })))
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

async fn get_view(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.view.snapshot().await)
}

#[derive(Deserialize)]
struct SelectRequest {
    id: String,
}

async fn select_movie(
    State(state): State<AppState>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<MovieDetail>, AppError> {
    let movie = state
        .view
        .select(&body.id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("{} is not in the current results", body.id)))?;
    Ok(Json(movie))
}

async fn clear_selection(State(state): State<AppState>) -> StatusCode {
    state.view.clear_selection().await;
    StatusCode::NO_CONTENT
}
