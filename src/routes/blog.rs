use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::blog::{CreateBlogPostRequest, PublishRequest, UpdateBlogPostRequest},
    error::AppResult,
    middleware::auth::AdminUser,
    models::BlogPost,
    response::{ApiResponse, Meta},
    routes::extract::{AppJson, AppPath},
    services::content_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct BlogPostListResponse {
    pub message: String,
    pub data: Vec<BlogPost>,
    pub meta: Option<Meta>,
}

// Reads address a post by slug and writes by numeric id, so both share the
// `/{key}` segment.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_published).post(create_post))
        .route("/all", get(list_all))
        .route("/id/{id}", get(get_post))
        .route("/category/{category}", get(list_by_category))
        .route(
            "/{key}",
            get(get_post_by_slug)
                .put(update_post)
                .patch(set_published)
                .delete(delete_post),
        )
}

#[utoipa::path(
    get,
    path = "/api/blog",
    responses(
        (status = 200, description = "Published posts, newest first", body = BlogPostListResponse)
    ),
    tag = "Blog"
)]
pub async fn list_published(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<BlogPost>>>> {
    let resp = content_service::list_published_posts(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/blog/all",
    responses(
        (status = 200, description = "All posts including drafts", body = BlogPostListResponse),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<Vec<BlogPost>>>> {
    let resp = content_service::list_all_posts(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    params(
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "Post", body = ApiResponse<BlogPost>),
        (status = 404, description = "Post not found")
    ),
    tag = "Blog"
)]
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let resp = content_service::get_post_by_slug(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/blog/id/{id}",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post", body = ApiResponse<BlogPost>),
        (status = 404, description = "Post not found")
    ),
    tag = "Blog"
)]
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let resp = content_service::get_post(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/blog/category/{category}",
    params(
        ("category" = String, Path, description = "Category name, exact match")
    ),
    responses(
        (status = 200, description = "Published posts in the category", body = BlogPostListResponse)
    ),
    tag = "Blog"
)]
pub async fn list_by_category(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> AppResult<Json<ApiResponse<Vec<BlogPost>>>> {
    let resp = content_service::list_posts_by_category(&state, &category).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/blog",
    request_body = CreateBlogPostRequest,
    responses(
        (status = 201, description = "Created post", body = ApiResponse<BlogPost>),
        (status = 400, description = "Invalid post or slug taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn create_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppJson(payload): AppJson<CreateBlogPostRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BlogPost>>)> {
    let resp = content_service::create_post(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/blog/{id}",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = UpdateBlogPostRequest,
    responses(
        (status = 200, description = "Updated post", body = ApiResponse<BlogPost>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn update_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateBlogPostRequest>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let resp = content_service::update_post(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/blog/{id}",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Post with new publish state", body = ApiResponse<BlogPost>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn set_published(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let resp = content_service::set_published(&state, id, payload.is_published).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/blog/{id}",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Deleted post, or nothing to delete")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = content_service::delete_post(&state, id).await?;
    Ok(Json(resp))
}
