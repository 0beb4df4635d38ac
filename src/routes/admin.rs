use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::auth::{AdminProfile, LoginRequest, LoginResponse},
    error::AppResult,
    middleware::auth::AdminUser,
    response::{ApiResponse, Meta},
    routes::extract::AppJson,
    services::auth_service::{self, ADMIN_ROLE},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/verify", get(verify))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token valid for 24 hours", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/verify",
    responses(
        (status = 200, description = "Token is valid", body = ApiResponse<AdminProfile>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn verify(admin: AdminUser) -> Json<ApiResponse<AdminProfile>> {
    let profile = AdminProfile {
        username: admin.username,
        role: ADMIN_ROLE.to_string(),
    };
    Json(ApiResponse::success("Token valid", profile, Some(Meta::empty())))
}
