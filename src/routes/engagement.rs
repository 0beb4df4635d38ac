use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::engagement::{ContactRequest, SubscribeRequest},
    error::AppResult,
    models::{ContactMessage, NewsletterSubscription, Testimonial},
    response::{ApiResponse, Meta},
    routes::extract::AppJson,
    services::engagement_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct TestimonialListResponse {
    pub message: String,
    pub data: Vec<Testimonial>,
    pub meta: Option<Meta>,
}

// Mounted at the API root: these endpoints live under three prefixes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/testimonials", get(list_testimonials))
        .route("/newsletter/subscribe", post(subscribe))
        .route("/contact", post(contact))
}

#[utoipa::path(
    get,
    path = "/api/testimonials",
    responses(
        (status = 200, description = "Active testimonials", body = TestimonialListResponse)
    ),
    tag = "Engagement"
)]
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Testimonial>>>> {
    let resp = engagement_service::list_testimonials(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/newsletter/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription, new or existing", body = ApiResponse<NewsletterSubscription>),
        (status = 400, description = "Invalid email")
    ),
    tag = "Engagement"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubscribeRequest>,
) -> AppResult<Json<ApiResponse<NewsletterSubscription>>> {
    let resp = engagement_service::subscribe_newsletter(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Stored contact message", body = ApiResponse<ContactMessage>),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "Engagement"
)]
pub async fn contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ContactMessage>>)> {
    let resp = engagement_service::submit_contact(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
