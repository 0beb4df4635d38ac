use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::chat::{ChatReply, ChatRequest, RecommendationList, RecommendationRequest},
    error::AppResult,
    models::ChatMessage,
    response::{ApiResponse, Meta},
    routes::extract::{AppJson, AppPath},
    services::assistant_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct ChatHistoryResponse {
    pub message: String,
    pub data: Vec<ChatMessage>,
    pub meta: Option<Meta>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(chat))
        .route("/recommendations", post(recommendations))
        .route("/history/{session_id}", get(history))
}

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply; a fallback message when the provider is unavailable", body = ApiResponse<ChatReply>),
        (status = 400, description = "Invalid message or session id")
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ChatRequest>,
) -> AppResult<Json<ApiResponse<ChatReply>>> {
    let resp = assistant_service::reply(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/chat/recommendations",
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "Catalog product names matching the query", body = ApiResponse<RecommendationList>),
        (status = 400, description = "Missing query")
    ),
    tag = "Chat"
)]
pub async fn recommendations(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RecommendationRequest>,
) -> AppResult<Json<ApiResponse<RecommendationList>>> {
    let resp = assistant_service::recommend_products(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/chat/history/{session_id}",
    params(
        ("session_id" = String, Path, description = "Client-chosen session id")
    ),
    responses(
        (status = 200, description = "Stored turns, oldest first", body = ChatHistoryResponse)
    ),
    tag = "Chat"
)]
pub async fn history(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<String>,
) -> AppResult<Json<ApiResponse<Vec<ChatMessage>>>> {
    let resp = assistant_service::get_history(&state, &session_id).await?;
    Ok(Json(resp))
}
