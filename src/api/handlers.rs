use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{CollectionItem, UserProfile},
    services::{bgg::Filters, compare_users, round_score},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct Usernames {
    pub username1: String,
    pub username2: String,
}

#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub similarity_score: f64,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Scores how much two users' top owned and rated games overlap
pub async fn calculate_similarity_score(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(usernames): Json<Usernames>,
) -> AppResult<Json<SimilarityResponse>> {
    let first = usernames.username1.trim();
    let second = usernames.username2.trim();

    if first.is_empty() || second.is_empty() {
        return Err(AppError::InvalidInput(
            "Both usernames are required".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        username1 = %first,
        username2 = %second,
        "Processing similarity request"
    );

    let report = compare_users(&state.bgg, first, second, state.top_games_limit).await;

    tracing::info!(
        request_id = %request_id,
        score = report.score,
        "Similarity computed"
    );

    Ok(Json(SimilarityResponse {
        similarity_score: round_score(report.score),
    }))
}

/// User profile; query parameters are forwarded to BGG as filters
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(filters): Query<Filters>,
) -> AppResult<Json<UserProfile>> {
    let user = state.bgg.fetch_user(&username, &filters).await?;
    Ok(Json(user))
}

/// User collection; query parameters are forwarded to BGG as filters
pub async fn get_collection(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(filters): Query<Filters>,
) -> AppResult<Json<Vec<CollectionItem>>> {
    let items = state.bgg.fetch_collection(&username, &filters).await?;
    Ok(Json(items))
}
