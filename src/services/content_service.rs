use crate::{
    dto::blog::{CreateBlogPostRequest, UpdateBlogPostRequest},
    error::{AppError, AppResult},
    models::BlogPost,
    response::{ApiResponse, Meta},
    state::AppState,
    store::{BlogPostPatch, StoreError},
};

fn post_not_found(id: i32) -> AppError {
    AppError::not_found(format!("Blog post {id}"))
}

fn slug_taken(err: StoreError) -> AppError {
    match err {
        StoreError::Conflict(what) => AppError::InvalidInput(format!("{what} is already taken")),
        other => other.into(),
    }
}

pub async fn list_published_posts(state: &AppState) -> AppResult<ApiResponse<Vec<BlogPost>>> {
    let items = state.store.list_blog_posts(true).await?;
    Ok(ApiResponse::list("Blog posts", items))
}

/// Admin view: drafts included.
pub async fn list_all_posts(state: &AppState) -> AppResult<ApiResponse<Vec<BlogPost>>> {
    let items = state.store.list_blog_posts(false).await?;
    Ok(ApiResponse::list("All blog posts", items))
}

pub async fn get_post_by_slug(state: &AppState, slug: &str) -> AppResult<ApiResponse<BlogPost>> {
    let post = state
        .store
        .find_post_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Blog post '{slug}'")))?;
    Ok(ApiResponse::success("Blog post", post, None))
}

pub async fn get_post(state: &AppState, id: i32) -> AppResult<ApiResponse<BlogPost>> {
    let post = state
        .store
        .find_post(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;
    Ok(ApiResponse::success("Blog post", post, None))
}

pub async fn list_posts_by_category(
    state: &AppState,
    category: &str,
) -> AppResult<ApiResponse<Vec<BlogPost>>> {
    let items = state.store.list_published_posts_by_category(category).await?;
    Ok(ApiResponse::list("Blog posts", items))
}

pub async fn create_post(
    state: &AppState,
    payload: CreateBlogPostRequest,
) -> AppResult<ApiResponse<BlogPost>> {
    let input = payload.into_new()?;
    let post = state.store.insert_post(input).await.map_err(slug_taken)?;
    tracing::info!(post_id = post.id, slug = %post.slug, "blog post created");

    Ok(ApiResponse::success(
        "Blog post created",
        post,
        Some(Meta::empty()),
    ))
}

/// Merges the provided fields; `updatedAt` advances on every call.
pub async fn update_post(
    state: &AppState,
    id: i32,
    payload: UpdateBlogPostRequest,
) -> AppResult<ApiResponse<BlogPost>> {
    let patch = payload.into_patch()?;
    let post = state
        .store
        .update_post(id, patch)
        .await
        .map_err(slug_taken)?
        .ok_or_else(|| post_not_found(id))?;
    tracing::info!(post_id = post.id, "blog post updated");

    Ok(ApiResponse::success("Updated", post, Some(Meta::empty())))
}

pub async fn set_published(
    state: &AppState,
    id: i32,
    is_published: bool,
) -> AppResult<ApiResponse<BlogPost>> {
    let patch = BlogPostPatch {
        is_published: Some(is_published),
        ..Default::default()
    };
    let post = state
        .store
        .update_post(id, patch)
        .await?
        .ok_or_else(|| post_not_found(id))?;
    tracing::info!(post_id = post.id, is_published, "blog post publish state changed");

    let message = if is_published { "Published" } else { "Unpublished" };
    Ok(ApiResponse::success(message, post, Some(Meta::empty())))
}

/// Hard delete, idempotent.
pub async fn delete_post(state: &AppState, id: i32) -> AppResult<ApiResponse<serde_json::Value>> {
    let removed = state.store.delete_post(id).await?;
    if removed {
        tracing::info!(post_id = id, "blog post deleted");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id, "removed": removed }),
        Some(Meta::empty()),
    ))
}
