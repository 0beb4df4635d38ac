use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{
    BlogPost, Category, ChatMessage, ContactMessage, NewsletterSubscription, Product, Testimonial,
    discount_percent,
};

use super::{
    BlogPostPatch, NewBlogPost, NewCategory, NewChatMessage, NewContactMessage, NewProduct,
    NewTestimonial, ProductPatch, Store, StoreError, StoreResult,
};

/// One table: rows keyed by id plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
struct Tables {
    products: Table<Product>,
    categories: Table<Category>,
    blog_posts: Table<BlogPost>,
    testimonials: Table<Testimonial>,
    subscriptions: Table<NewsletterSubscription>,
    contacts: Table<ContactMessage>,
    chat_messages: Table<ChatMessage>,
}

fn newest_first(mut posts: Vec<BlogPost>) -> Vec<BlogPost> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    posts
}

/// In-process store with the same invariants as [`super::PgStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_active_products(&self) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .rows
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }

    async fn list_featured_products(&self, limit: u64) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .rows
            .values()
            .filter(|p| p.is_active && p.is_featured)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_product(&self, id: i32) -> StoreResult<Option<Product>> {
        Ok(self.tables.read().await.products.rows.get(&id).cloned())
    }

    async fn search_products(&self, query: &str) -> StoreResult<Vec<Product>> {
        let needle = query.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .rows
            .values()
            .filter(|p| p.is_active)
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn insert_product(&self, input: NewProduct) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        let id = tables.products.allocate_id();
        let product = Product {
            id,
            discount: discount_percent(input.price, input.original_price),
            name: input.name,
            description: input.description,
            category: input.category,
            price: input.price,
            original_price: input.original_price,
            rating: input.rating,
            image_url: input.image_url,
            affiliate_url: input.affiliate_url,
            is_active: input.is_active,
            is_featured: input.is_featured,
            created_at: Utc::now(),
        };
        tables.products.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i32, patch: ProductPatch) -> StoreResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        let Some(product) = tables.products.rows.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(product);
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables.write().await.products.rows.remove(&id).is_some())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .rows
            .values()
            .cloned()
            .collect())
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .rows
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn insert_category(&self, input: NewCategory) -> StoreResult<Category> {
        let mut tables = self.tables.write().await;
        if tables.categories.rows.values().any(|c| c.name == input.name) {
            return Err(StoreError::Conflict(format!("category '{}'", input.name)));
        }
        let id = tables.categories.allocate_id();
        let category = Category {
            id,
            name: input.name,
            is_default: input.is_default,
            created_at: Utc::now(),
        };
        tables.categories.rows.insert(id, category.clone());
        Ok(category)
    }

    async fn list_blog_posts(&self, published_only: bool) -> StoreResult<Vec<BlogPost>> {
        let tables = self.tables.read().await;
        let posts = tables
            .blog_posts
            .rows
            .values()
            .filter(|p| !published_only || p.is_published)
            .cloned()
            .collect::<Vec<_>>();
        Ok(newest_first(posts))
    }

    async fn list_published_posts_by_category(
        &self,
        category: &str,
    ) -> StoreResult<Vec<BlogPost>> {
        let tables = self.tables.read().await;
        let posts = tables
            .blog_posts
            .rows
            .values()
            .filter(|p| p.is_published && p.category == category)
            .cloned()
            .collect::<Vec<_>>();
        Ok(newest_first(posts))
    }

    async fn find_post_by_slug(&self, slug: &str) -> StoreResult<Option<BlogPost>> {
        let tables = self.tables.read().await;
        Ok(tables
            .blog_posts
            .rows
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn find_post(&self, id: i32) -> StoreResult<Option<BlogPost>> {
        Ok(self.tables.read().await.blog_posts.rows.get(&id).cloned())
    }

    async fn insert_post(&self, input: NewBlogPost) -> StoreResult<BlogPost> {
        let mut tables = self.tables.write().await;
        if tables.blog_posts.rows.values().any(|p| p.slug == input.slug) {
            return Err(StoreError::Conflict(format!("slug '{}'", input.slug)));
        }
        let id = tables.blog_posts.allocate_id();
        let now = Utc::now();
        let post = BlogPost {
            id,
            title: input.title,
            slug: input.slug,
            excerpt: input.excerpt,
            content: input.content,
            category: input.category,
            image_url: input.image_url,
            affiliate_url: input.affiliate_url,
            tags: input.tags,
            is_published: input.is_published,
            created_at: now,
            updated_at: now,
        };
        tables.blog_posts.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: i32, patch: BlogPostPatch) -> StoreResult<Option<BlogPost>> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = &patch.slug {
            let taken = tables
                .blog_posts
                .rows
                .values()
                .any(|p| p.id != id && &p.slug == slug);
            if taken {
                return Err(StoreError::Conflict(format!("slug '{slug}'")));
            }
        }
        let Some(post) = tables.blog_posts.rows.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(post, Utc::now());
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables.write().await.blog_posts.rows.remove(&id).is_some())
    }

    async fn list_active_testimonials(&self) -> StoreResult<Vec<Testimonial>> {
        let tables = self.tables.read().await;
        Ok(tables
            .testimonials
            .rows
            .values()
            .filter(|t| t.is_active)
            .cloned()
            .collect())
    }

    async fn insert_testimonial(&self, input: NewTestimonial) -> StoreResult<Testimonial> {
        let mut tables = self.tables.write().await;
        let id = tables.testimonials.allocate_id();
        let testimonial = Testimonial {
            id,
            name: input.name,
            title: input.title,
            content: input.content,
            rating: input.rating,
            avatar_url: input.avatar_url,
            is_active: true,
        };
        tables.testimonials.rows.insert(id, testimonial.clone());
        Ok(testimonial)
    }

    async fn find_subscription(&self, email: &str) -> StoreResult<Option<NewsletterSubscription>> {
        let tables = self.tables.read().await;
        Ok(tables
            .subscriptions
            .rows
            .values()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn insert_subscription(&self, email: &str) -> StoreResult<NewsletterSubscription> {
        let mut tables = self.tables.write().await;
        if tables.subscriptions.rows.values().any(|s| s.email == email) {
            return Err(StoreError::Conflict(format!("subscription for '{email}'")));
        }
        let id = tables.subscriptions.allocate_id();
        let subscription = NewsletterSubscription {
            id,
            email: email.to_string(),
            subscribed_at: Utc::now(),
            is_active: true,
        };
        tables.subscriptions.rows.insert(id, subscription.clone());
        Ok(subscription)
    }

    async fn insert_contact(&self, input: NewContactMessage) -> StoreResult<ContactMessage> {
        let mut tables = self.tables.write().await;
        let id = tables.contacts.allocate_id();
        let contact = ContactMessage {
            id,
            name: input.name,
            email: input.email,
            subject: input.subject,
            message: input.message,
            created_at: Utc::now(),
        };
        tables.contacts.rows.insert(id, contact.clone());
        Ok(contact)
    }

    async fn insert_chat_message(&self, input: NewChatMessage) -> StoreResult<ChatMessage> {
        let mut tables = self.tables.write().await;
        let id = tables.chat_messages.allocate_id();
        let message = ChatMessage {
            id,
            session_id: input.session_id,
            message: input.message,
            response: input.response,
            created_at: Utc::now(),
        };
        tables.chat_messages.rows.insert(id, message.clone());
        Ok(message)
    }

    async fn list_chat_messages(&self, session_id: &str) -> StoreResult<Vec<ChatMessage>> {
        let tables = self.tables.read().await;
        let mut messages: Vec<ChatMessage> = tables
            .chat_messages
            .rows
            .values()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }
}
