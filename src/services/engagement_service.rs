use crate::{
    dto::engagement::{ContactRequest, SubscribeRequest},
    error::{AppError, AppResult},
    models::{ContactMessage, NewsletterSubscription, Testimonial},
    response::{ApiResponse, Meta},
    state::AppState,
    store::StoreError,
};

pub async fn list_testimonials(state: &AppState) -> AppResult<ApiResponse<Vec<Testimonial>>> {
    let items = state.store.list_active_testimonials().await?;
    Ok(ApiResponse::list("Testimonials", items))
}

/// Subscribing twice with the same address is not an error; the existing
/// subscription is returned.
pub async fn subscribe_newsletter(
    state: &AppState,
    payload: SubscribeRequest,
) -> AppResult<ApiResponse<NewsletterSubscription>> {
    let email = payload.normalized_email()?;

    if let Some(existing) = state.store.find_subscription(&email).await? {
        return Ok(ApiResponse::success(
            "Already subscribed",
            existing,
            Some(Meta::empty()),
        ));
    }

    match state.store.insert_subscription(&email).await {
        Ok(subscription) => {
            tracing::info!(subscription_id = subscription.id, "newsletter subscription created");
            Ok(ApiResponse::success(
                "Subscribed",
                subscription,
                Some(Meta::empty()),
            ))
        }
        Err(StoreError::Conflict(_)) => {
            let existing = state
                .store
                .find_subscription(&email)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!(
                        "subscription reported as duplicate but not found"
                    ))
                })?;
            Ok(ApiResponse::success(
                "Already subscribed",
                existing,
                Some(Meta::empty()),
            ))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn submit_contact(
    state: &AppState,
    payload: ContactRequest,
) -> AppResult<ApiResponse<ContactMessage>> {
    let input = payload.into_new()?;
    let contact = state.store.insert_contact(input).await?;
    tracing::info!(contact_id = contact.id, "contact message received");

    Ok(ApiResponse::success(
        "Message received",
        contact,
        Some(Meta::empty()),
    ))
}
