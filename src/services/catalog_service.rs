use crate::{
    dto::{
        categories::CreateCategoryRequest,
        products::{CreateProductRequest, UpdateProductRequest},
    },
    error::{AppError, AppResult},
    models::{Category, Product},
    response::{ApiResponse, Meta},
    state::AppState,
    store::StoreError,
};

pub const DEFAULT_FEATURED_LIMIT: u64 = 6;
const MAX_FEATURED_LIMIT: u64 = 100;

pub async fn list_active_products(state: &AppState) -> AppResult<ApiResponse<Vec<Product>>> {
    let items = state.store.list_active_products().await?;
    Ok(ApiResponse::list("Products", items))
}

/// Featured products only; never backfilled from the rest of the catalog.
pub async fn list_featured_products(
    state: &AppState,
    limit: Option<u64>,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let limit = limit
        .unwrap_or(DEFAULT_FEATURED_LIMIT)
        .min(MAX_FEATURED_LIMIT);
    let items = if limit == 0 {
        Vec::new()
    } else {
        state.store.list_featured_products(limit).await?
    };
    Ok(ApiResponse::list("Featured products", items))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = state
        .store
        .find_product(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn search_products(
    state: &AppState,
    query: Option<&str>,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let query = query.map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::InvalidInput("Search query is required".into()));
    }
    let items = state.store.search_products(query).await?;
    Ok(ApiResponse::list("Search results", items))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let input = payload.into_new()?;
    let product = state.store.insert_product(input).await?;
    tracing::info!(product_id = product.id, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let patch = payload.into_patch()?;
    let product = state
        .store
        .update_product(id, patch)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    tracing::info!(product_id = product.id, "product updated");

    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

/// Hard delete. Deleting an id that does not exist is still a success.
pub async fn delete_product(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let removed = state.store.delete_product(id).await?;
    if removed {
        tracing::info!(product_id = id, "product deleted");
    } else {
        tracing::debug!(product_id = id, "delete of absent product ignored");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id, "removed": removed }),
        Some(Meta::empty()),
    ))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<Vec<Category>>> {
    let items = state.store.list_categories().await?;
    Ok(ApiResponse::list("Categories", items))
}

/// Creating a category whose name already exists returns the existing row,
/// including when a concurrent request inserted it first.
pub async fn create_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let input = payload.into_new()?;
    let name = input.name.clone();

    match state.store.insert_category(input).await {
        Ok(category) => {
            tracing::info!(category_id = category.id, "category created");
            Ok(ApiResponse::success(
                "Category created",
                category,
                Some(Meta::empty()),
            ))
        }
        Err(StoreError::Conflict(_)) => {
            let existing = state
                .store
                .find_category_by_name(&name)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!(
                        "category '{name}' reported as duplicate but not found"
                    ))
                })?;
            tracing::debug!(category_id = existing.id, "category already exists");
            Ok(ApiResponse::success(
                "Category already exists",
                existing,
                Some(Meta::empty()),
            ))
        }
        Err(err) => Err(err.into()),
    }
}
