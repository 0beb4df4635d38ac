use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    store::{BlogPostPatch, NewBlogPost},
};

use super::{RESERVED_SLUGS, check_not_blank, is_valid_slug};

fn check_slug(slug: &str) -> AppResult<()> {
    if RESERVED_SLUGS.contains(&slug) {
        Err(AppError::InvalidInput(format!("slug '{slug}' is reserved")))
    } else if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(
            "slug must be lowercase letters and digits separated by single hyphens".into(),
        ))
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    pub slug: String,
    #[validate(length(min = 1, max = 500, message = "excerpt must be 1-500 characters"))]
    pub excerpt: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: String,
    #[validate(url(message = "affiliateUrl must be a valid URL"))]
    pub affiliate_url: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20, message = "at most 20 tags"))]
    pub tags: Vec<String>,
    pub is_published: Option<bool>,
}

impl CreateBlogPostRequest {
    pub fn into_new(self) -> AppResult<NewBlogPost> {
        self.validate()?;
        check_slug(&self.slug)?;
        check_not_blank("title", &self.title)?;
        check_not_blank("category", &self.category)?;
        Ok(NewBlogPost {
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            image_url: self.image_url,
            affiliate_url: self.affiliate_url,
            tags: self.tags,
            is_published: self.is_published.unwrap_or(false),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 500, message = "excerpt must be 1-500 characters"))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: Option<String>,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(url(message = "affiliateUrl must be a valid URL"))]
    pub affiliate_url: Option<String>,
    #[validate(length(max = 20, message = "at most 20 tags"))]
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

impl UpdateBlogPostRequest {
    pub fn into_patch(self) -> AppResult<BlogPostPatch> {
        self.validate()?;
        if let Some(slug) = &self.slug {
            check_slug(slug)?;
        }
        if let Some(title) = &self.title {
            check_not_blank("title", title)?;
        }
        Ok(BlogPostPatch {
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            image_url: self.image_url,
            affiliate_url: self.affiliate_url,
            tags: self.tags,
            is_published: self.is_published,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub is_published: bool,
}
