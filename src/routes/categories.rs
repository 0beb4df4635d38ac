use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::categories::CreateCategoryRequest,
    error::AppResult,
    middleware::auth::AdminUser,
    models::Category,
    response::{ApiResponse, Meta},
    routes::extract::AppJson,
    services::catalog_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub message: String,
    pub data: Vec<Category>,
    pub meta: Option<Meta>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories).post(create_category))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = CategoryListResponse)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let resp = catalog_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Created category, or the existing one with that name", body = ApiResponse<Category>),
        (status = 400, description = "Invalid category")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = catalog_service::create_category(&state, payload).await?;
    Ok(Json(resp))
}
