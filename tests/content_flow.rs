mod common;

use devtoolhub_api::{
    dto::blog::{CreateBlogPostRequest, UpdateBlogPostRequest},
    error::AppError,
    services::{content_service, engagement_service},
};
use serde_json::json;

use common::{memory_state, post_json};

fn create_request(value: serde_json::Value) -> CreateBlogPostRequest {
    serde_json::from_value(value).expect("valid request body")
}

#[tokio::test]
async fn drafts_are_hidden_until_published() -> anyhow::Result<()> {
    let state = memory_state();

    let draft = content_service::create_post(
        &state,
        create_request(post_json("Async Rust", "async-rust", "Rust", false)),
    )
    .await?
    .data
    .expect("post");
    assert!(!draft.is_published);

    let public = content_service::list_published_posts(&state).await?.data.unwrap();
    assert!(public.is_empty());
    let all = content_service::list_all_posts(&state).await?.data.unwrap();
    assert_eq!(all.len(), 1);

    let published = content_service::set_published(&state, draft.id, true).await?;
    assert_eq!(published.message, "Published");
    let published = published.data.expect("post");
    assert!(published.updated_at >= draft.updated_at);

    let public = content_service::list_published_posts(&state).await?.data.unwrap();
    assert_eq!(public.len(), 1);
    let by_slug = content_service::get_post_by_slug(&state, "async-rust").await?;
    assert_eq!(by_slug.data.expect("post").id, draft.id);
    Ok(())
}

#[tokio::test]
async fn published_posts_are_listed_newest_first() -> anyhow::Result<()> {
    let state = memory_state();
    for slug in ["first-post", "second-post", "third-post"] {
        content_service::create_post(&state, create_request(post_json(slug, slug, "Rust", true)))
            .await?;
    }

    let posts = content_service::list_published_posts(&state).await?.data.unwrap();
    let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["third-post", "second-post", "first-post"]);
    Ok(())
}

#[tokio::test]
async fn category_listing_is_exact_and_published_only() -> anyhow::Result<()> {
    let state = memory_state();
    content_service::create_post(&state, create_request(post_json("A", "a-post", "Rust", true)))
        .await?;
    content_service::create_post(&state, create_request(post_json("B", "b-post", "Rust", false)))
        .await?;
    content_service::create_post(&state, create_request(post_json("C", "c-post", "Go", true)))
        .await?;

    let rust = content_service::list_posts_by_category(&state, "Rust")
        .await?
        .data
        .unwrap();
    assert_eq!(rust.len(), 1);
    assert_eq!(rust[0].slug, "a-post");

    let lowercase = content_service::list_posts_by_category(&state, "rust")
        .await?
        .data
        .unwrap();
    assert!(lowercase.is_empty());
    Ok(())
}

#[tokio::test]
async fn slugs_are_unique_and_well_formed() -> anyhow::Result<()> {
    let state = memory_state();
    let first = content_service::create_post(
        &state,
        create_request(post_json("One", "shared-slug", "Rust", true)),
    )
    .await?
    .data
    .expect("post");

    let duplicate = content_service::create_post(
        &state,
        create_request(post_json("Two", "shared-slug", "Rust", true)),
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::InvalidInput(_))));

    let malformed = content_service::create_post(
        &state,
        create_request(post_json("Three", "Not A Slug", "Rust", true)),
    )
    .await;
    assert!(matches!(malformed, Err(AppError::InvalidInput(_))));

    let other = content_service::create_post(
        &state,
        create_request(post_json("Four", "other-slug", "Rust", true)),
    )
    .await?
    .data
    .expect("post");
    let steal: UpdateBlogPostRequest = serde_json::from_value(json!({ "slug": "shared-slug" }))?;
    let stolen = content_service::update_post(&state, other.id, steal).await;
    assert!(matches!(stolen, Err(AppError::InvalidInput(_))));

    // Re-saving a post with its own slug is fine.
    let keep: UpdateBlogPostRequest = serde_json::from_value(json!({ "slug": "shared-slug" }))?;
    content_service::update_post(&state, first.id, keep).await?;
    Ok(())
}

#[tokio::test]
async fn update_merges_fields_and_advances_updated_at() -> anyhow::Result<()> {
    let state = memory_state();
    let post = content_service::create_post(
        &state,
        create_request(post_json("Original", "original", "Rust", true)),
    )
    .await?
    .data
    .expect("post");

    let patch: UpdateBlogPostRequest = serde_json::from_value(json!({ "title": "Renamed" }))?;
    let updated = content_service::update_post(&state, post.id, patch)
        .await?
        .data
        .expect("post");
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.slug, "original");
    assert_eq!(updated.tags, vec!["rust".to_string()]);
    assert!(updated.updated_at >= post.updated_at);
    assert_eq!(updated.created_at, post.created_at);
    Ok(())
}

#[tokio::test]
async fn unpublishing_hides_a_post_from_public_listings_only() -> anyhow::Result<()> {
    let state = memory_state();
    let post = content_service::create_post(
        &state,
        create_request(post_json("Live Post", "live-post", "Rust", true)),
    )
    .await?
    .data
    .expect("post");

    let public = content_service::list_published_posts(&state).await?.data.unwrap();
    assert!(public.iter().any(|p| p.id == post.id));

    let hidden = content_service::set_published(&state, post.id, false)
        .await?
        .data
        .expect("post");
    assert!(!hidden.is_published);

    let public = content_service::list_published_posts(&state).await?.data.unwrap();
    assert!(public.iter().all(|p| p.id != post.id));
    let by_category = content_service::list_posts_by_category(&state, "Rust")
        .await?
        .data
        .unwrap();
    assert!(by_category.is_empty());

    let all = content_service::list_all_posts(&state).await?.data.unwrap();
    assert!(all.iter().any(|p| p.id == post.id && !p.is_published));
    Ok(())
}

#[tokio::test]
async fn empty_update_still_advances_updated_at() -> anyhow::Result<()> {
    let state = memory_state();
    let post = content_service::create_post(
        &state,
        create_request(post_json("Quiet Post", "quiet-post", "Rust", true)),
    )
    .await?
    .data
    .expect("post");

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let empty: UpdateBlogPostRequest = serde_json::from_value(json!({}))?;
    let touched = content_service::update_post(&state, post.id, empty)
        .await?
        .data
        .expect("post");
    assert!(touched.updated_at > post.updated_at);
    assert_eq!(touched.title, post.title);
    assert_eq!(touched.slug, post.slug);
    assert_eq!(touched.created_at, post.created_at);
    Ok(())
}

#[tokio::test]
async fn reserved_slugs_are_rejected() -> anyhow::Result<()> {
    let state = memory_state();
    for slug in ["all", "id", "category"] {
        let created = content_service::create_post(
            &state,
            create_request(post_json("Shadowed", slug, "Rust", true)),
        )
        .await;
        assert!(matches!(created, Err(AppError::InvalidInput(_))), "{slug}");
    }
    Ok(())
}

#[tokio::test]
async fn deleting_posts_is_idempotent() -> anyhow::Result<()> {
    let state = memory_state();
    let post = content_service::create_post(
        &state,
        create_request(post_json("Gone", "gone-soon", "Rust", true)),
    )
    .await?
    .data
    .expect("post");

    content_service::delete_post(&state, post.id).await?;
    content_service::delete_post(&state, post.id).await?;
    assert!(matches!(
        content_service::get_post(&state, post.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        content_service::set_published(&state, post.id, true).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn newsletter_subscription_is_idempotent_per_email() -> anyhow::Result<()> {
    let state = memory_state();

    let first = engagement_service::subscribe_newsletter(
        &state,
        serde_json::from_value(json!({ "email": "dev@example.com" }))?,
    )
    .await?
    .data
    .expect("subscription");

    let second = engagement_service::subscribe_newsletter(
        &state,
        serde_json::from_value(json!({ "email": "Dev@Example.com" }))?,
    )
    .await?;
    assert_eq!(second.message, "Already subscribed");
    assert_eq!(second.data.expect("subscription").id, first.id);

    let invalid = engagement_service::subscribe_newsletter(
        &state,
        serde_json::from_value(json!({ "email": "nope" }))?,
    )
    .await;
    assert!(matches!(invalid, Err(AppError::InvalidInput(_))));
    Ok(())
}

#[tokio::test]
async fn contact_requires_every_field() -> anyhow::Result<()> {
    let state = memory_state();

    let stored = engagement_service::submit_contact(
        &state,
        serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Partnership",
            "message": "Hello there",
        }))?,
    )
    .await?
    .data
    .expect("contact");
    assert_eq!(stored.subject, "Partnership");

    let missing_subject = engagement_service::submit_contact(
        &state,
        serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "",
            "message": "Hello there",
        }))?,
    )
    .await;
    assert!(matches!(missing_subject, Err(AppError::InvalidInput(_))));
    Ok(())
}
