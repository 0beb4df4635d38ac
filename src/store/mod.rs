//! Persistence boundary.
//!
//! Services talk to a [`Store`] and never to a concrete database. Two
//! implementations exist: [`PgStore`] over PostgreSQL through sea-orm, and
//! [`MemoryStore`] for environments without a database and for tests. Both
//! enforce the same uniqueness rules and report them as
//! [`StoreError::Conflict`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    BlogPost, Category, ChatMessage, ContactMessage, NewsletterSubscription, Product, Testimonial,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field (category name, blog slug, newsletter email) is taken.
    #[error("{0} already exists")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub rating: Decimal,
    pub image_url: String,
    pub affiliate_url: String,
    pub is_active: bool,
    pub is_featured: bool,
}

/// Partial product update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub image_url: Option<String>,
    pub affiliate_url: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(original_price) = self.original_price {
            product.original_price = Some(original_price);
        }
        if let Some(rating) = self.rating {
            product.rating = rating;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        if let Some(affiliate_url) = self.affiliate_url {
            product.affiliate_url = affiliate_url;
        }
        if let Some(is_active) = self.is_active {
            product.is_active = is_active;
        }
        if let Some(is_featured) = self.is_featured {
            product.is_featured = is_featured;
        }
        product.discount = crate::models::discount_percent(product.price, product.original_price);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image_url: String,
    pub affiliate_url: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub affiliate_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

impl BlogPostPatch {
    /// Applies the provided fields and advances `updated_at`, even when the
    /// patch is empty.
    pub fn apply(self, post: &mut BlogPost, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(image_url) = self.image_url {
            post.image_url = image_url;
        }
        if let Some(affiliate_url) = self.affiliate_url {
            post.affiliate_url = Some(affiliate_url);
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        if let Some(is_published) = self.is_published {
            post.is_published = is_published;
        }
        post.updated_at = advance_timestamp(post.updated_at, now);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTestimonial {
    pub name: String,
    pub title: String,
    pub content: String,
    pub rating: i32,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChatMessage {
    pub session_id: String,
    pub message: String,
    pub response: String,
}

/// `updated_at` never moves backwards, even if the wall clock does.
pub fn advance_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous)
}

#[async_trait]
pub trait Store: Send + Sync {
    // products
    async fn list_active_products(&self) -> StoreResult<Vec<Product>>;
    async fn list_featured_products(&self, limit: u64) -> StoreResult<Vec<Product>>;
    async fn find_product(&self, id: i32) -> StoreResult<Option<Product>>;
    /// Case-insensitive substring match over name, description and category
    /// of active products. `query` is already trimmed and non-empty.
    async fn search_products(&self, query: &str) -> StoreResult<Vec<Product>>;
    async fn insert_product(&self, input: NewProduct) -> StoreResult<Product>;
    async fn update_product(&self, id: i32, patch: ProductPatch) -> StoreResult<Option<Product>>;
    /// Returns whether a row was removed.
    async fn delete_product(&self, id: i32) -> StoreResult<bool>;

    // categories
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>>;
    async fn insert_category(&self, input: NewCategory) -> StoreResult<Category>;

    // blog
    async fn list_blog_posts(&self, published_only: bool) -> StoreResult<Vec<BlogPost>>;
    async fn list_published_posts_by_category(&self, category: &str)
    -> StoreResult<Vec<BlogPost>>;
    async fn find_post_by_slug(&self, slug: &str) -> StoreResult<Option<BlogPost>>;
    async fn find_post(&self, id: i32) -> StoreResult<Option<BlogPost>>;
    async fn insert_post(&self, input: NewBlogPost) -> StoreResult<BlogPost>;
    async fn update_post(&self, id: i32, patch: BlogPostPatch) -> StoreResult<Option<BlogPost>>;
    async fn delete_post(&self, id: i32) -> StoreResult<bool>;

    // engagement
    async fn list_active_testimonials(&self) -> StoreResult<Vec<Testimonial>>;
    async fn insert_testimonial(&self, input: NewTestimonial) -> StoreResult<Testimonial>;
    async fn find_subscription(&self, email: &str) -> StoreResult<Option<NewsletterSubscription>>;
    async fn insert_subscription(&self, email: &str) -> StoreResult<NewsletterSubscription>;
    async fn insert_contact(&self, input: NewContactMessage) -> StoreResult<ContactMessage>;

    // chat log
    async fn insert_chat_message(&self, input: NewChatMessage) -> StoreResult<ChatMessage>;
    /// Messages of one session, oldest first.
    async fn list_chat_messages(&self, session_id: &str) -> StoreResult<Vec<ChatMessage>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn timestamp_never_moves_backwards() {
        let previous = Utc::now();
        let earlier = previous - Duration::seconds(5);
        assert_eq!(advance_timestamp(previous, earlier), previous);
        let later = previous + Duration::seconds(5);
        assert_eq!(advance_timestamp(previous, later), later);
    }
}
