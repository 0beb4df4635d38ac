use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};

use crate::{
    entity::{
        blog_posts, categories, chat_messages, contacts, newsletters, products, testimonials,
        BlogPosts, Categories, ChatMessages, Newsletters, Products, Testimonials,
    },
    models::{
        BlogPost, Category, ChatMessage, ContactMessage, NewsletterSubscription, Product,
        Testimonial, discount_percent,
    },
};

use super::{
    BlogPostPatch, NewBlogPost, NewCategory, NewChatMessage, NewContactMessage, NewProduct,
    NewTestimonial, ProductPatch, Store, StoreError, StoreResult,
};

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    orm: DatabaseConnection,
}

impl PgStore {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

/// Maps unique-constraint violations to [`StoreError::Conflict`].
fn conflict_or(err: DbErr, what: impl FnOnce() -> String) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict(what()),
        _ => StoreError::Database(err),
    }
}

/// Escapes LIKE wildcards so the query matches as a literal substring.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl Store for PgStore {
    async fn list_active_products(&self) -> StoreResult<Vec<Product>> {
        let rows = Products::find()
            .filter(products::Column::IsActive.eq(true))
            .order_by_asc(products::Column::Id)
            .all(&self.orm)
            .await?;
        Ok(rows.into_iter().map(product_from_entity).collect())
    }

    async fn list_featured_products(&self, limit: u64) -> StoreResult<Vec<Product>> {
        let rows = Products::find()
            .filter(
                Condition::all()
                    .add(products::Column::IsActive.eq(true))
                    .add(products::Column::IsFeatured.eq(true)),
            )
            .order_by_asc(products::Column::Id)
            .limit(limit)
            .all(&self.orm)
            .await?;
        Ok(rows.into_iter().map(product_from_entity).collect())
    }

    async fn find_product(&self, id: i32) -> StoreResult<Option<Product>> {
        let row = Products::find_by_id(id).one(&self.orm).await?;
        Ok(row.map(product_from_entity))
    }

    async fn search_products(&self, query: &str) -> StoreResult<Vec<Product>> {
        let pattern = like_pattern(query);
        let rows = Products::find()
            .filter(
                Condition::all().add(products::Column::IsActive.eq(true)).add(
                    Condition::any()
                        .add(Expr::col(products::Column::Name).ilike(pattern.clone()))
                        .add(Expr::col(products::Column::Description).ilike(pattern.clone()))
                        .add(Expr::col(products::Column::Category).ilike(pattern)),
                ),
            )
            .order_by_asc(products::Column::Id)
            .all(&self.orm)
            .await?;
        Ok(rows.into_iter().map(product_from_entity).collect())
    }

    async fn insert_product(&self, input: NewProduct) -> StoreResult<Product> {
        let active = products::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            category: Set(input.category),
            price: Set(input.price),
            original_price: Set(input.original_price),
            rating: Set(input.rating),
            image_url: Set(input.image_url),
            affiliate_url: Set(input.affiliate_url),
            is_active: Set(input.is_active),
            is_featured: Set(input.is_featured),
            created_at: NotSet,
        };
        let model = active.insert(&self.orm).await?;
        Ok(product_from_entity(model))
    }

    async fn update_product(&self, id: i32, patch: ProductPatch) -> StoreResult<Option<Product>> {
        let Some(existing) = Products::find_by_id(id).one(&self.orm).await? else {
            return Ok(None);
        };

        // Only patched columns end up in the UPDATE.
        let mut active: products::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(original_price) = patch.original_price {
            active.original_price = Set(Some(original_price));
        }
        if let Some(rating) = patch.rating {
            active.rating = Set(rating);
        }
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(affiliate_url) = patch.affiliate_url {
            active.affiliate_url = Set(affiliate_url);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_featured) = patch.is_featured {
            active.is_featured = Set(is_featured);
        }

        match active.update(&self.orm).await {
            Ok(model) => Ok(Some(product_from_entity(model))),
            // Deleted between the read and the write.
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_product(&self, id: i32) -> StoreResult<bool> {
        let result = Products::delete_by_id(id).exec(&self.orm).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.orm)
            .await?;
        Ok(rows.into_iter().map(category_from_entity).collect())
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let row = Categories::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.orm)
            .await?;
        Ok(row.map(category_from_entity))
    }

    async fn insert_category(&self, input: NewCategory) -> StoreResult<Category> {
        let name = input.name.clone();
        let active = categories::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            is_default: Set(input.is_default),
            created_at: NotSet,
        };
        let model = active
            .insert(&self.orm)
            .await
            .map_err(|e| conflict_or(e, || format!("category '{name}'")))?;
        Ok(category_from_entity(model))
    }

    async fn list_blog_posts(&self, published_only: bool) -> StoreResult<Vec<BlogPost>> {
        let mut finder = BlogPosts::find();
        if published_only {
            finder = finder.filter(blog_posts::Column::IsPublished.eq(true));
        }
        let rows = finder
            .order_by_desc(blog_posts::Column::CreatedAt)
            .order_by_desc(blog_posts::Column::Id)
            .all(&self.orm)
            .await?;
        Ok(rows.into_iter().map(post_from_entity).collect())
    }

    async fn list_published_posts_by_category(
        &self,
        category: &str,
    ) -> StoreResult<Vec<BlogPost>> {
        let rows = BlogPosts::find()
            .filter(
                Condition::all()
                    .add(blog_posts::Column::IsPublished.eq(true))
                    .add(blog_posts::Column::Category.eq(category)),
            )
            .order_by_desc(blog_posts::Column::CreatedAt)
            .order_by_desc(blog_posts::Column::Id)
            .all(&self.orm)
            .await?;
        Ok(rows.into_iter().map(post_from_entity).collect())
    }

    async fn find_post_by_slug(&self, slug: &str) -> StoreResult<Option<BlogPost>> {
        let row = BlogPosts::find()
            .filter(blog_posts::Column::Slug.eq(slug))
            .one(&self.orm)
            .await?;
        Ok(row.map(post_from_entity))
    }

    async fn find_post(&self, id: i32) -> StoreResult<Option<BlogPost>> {
        let row = BlogPosts::find_by_id(id).one(&self.orm).await?;
        Ok(row.map(post_from_entity))
    }

    async fn insert_post(&self, input: NewBlogPost) -> StoreResult<BlogPost> {
        let slug = input.slug.clone();
        let active = blog_posts::ActiveModel {
            id: NotSet,
            title: Set(input.title),
            slug: Set(input.slug),
            excerpt: Set(input.excerpt),
            content: Set(input.content),
            category: Set(input.category),
            image_url: Set(input.image_url),
            affiliate_url: Set(input.affiliate_url),
            tags: Set(input.tags),
            is_published: Set(input.is_published),
            created_at: NotSet,
            updated_at: NotSet,
        };
        let model = active
            .insert(&self.orm)
            .await
            .map_err(|e| conflict_or(e, || format!("slug '{slug}'")))?;
        Ok(post_from_entity(model))
    }

    async fn update_post(&self, id: i32, patch: BlogPostPatch) -> StoreResult<Option<BlogPost>> {
        let mut active = <blog_posts::ActiveModel as Default>::default();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        let slug = patch.slug.clone();
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        if let Some(excerpt) = patch.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(affiliate_url) = patch.affiliate_url {
            active.affiliate_url = Set(Some(affiliate_url));
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(tags);
        }
        if let Some(is_published) = patch.is_published {
            active.is_published = Set(is_published);
        }

        // Only patched columns are written; updated_at never moves backwards.
        let rows = BlogPosts::update_many()
            .set(active)
            .col_expr(
                blog_posts::Column::UpdatedAt,
                Expr::cust("GREATEST(updated_at, NOW())"),
            )
            .filter(blog_posts::Column::Id.eq(id))
            .exec_with_returning(&self.orm)
            .await
            .map_err(|e| conflict_or(e, || format!("slug '{}'", slug.unwrap_or_default())))?;
        Ok(rows.into_iter().next().map(post_from_entity))
    }

    async fn delete_post(&self, id: i32) -> StoreResult<bool> {
        let result = BlogPosts::delete_by_id(id).exec(&self.orm).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_active_testimonials(&self) -> StoreResult<Vec<Testimonial>> {
        let rows = Testimonials::find()
            .filter(testimonials::Column::IsActive.eq(true))
            .order_by_asc(testimonials::Column::Id)
            .all(&self.orm)
            .await?;
        Ok(rows.into_iter().map(testimonial_from_entity).collect())
    }

    async fn insert_testimonial(&self, input: NewTestimonial) -> StoreResult<Testimonial> {
        let active = testimonials::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            title: Set(input.title),
            content: Set(input.content),
            rating: Set(input.rating),
            avatar_url: Set(input.avatar_url),
            is_active: Set(true),
        };
        let model = active.insert(&self.orm).await?;
        Ok(testimonial_from_entity(model))
    }

    async fn find_subscription(&self, email: &str) -> StoreResult<Option<NewsletterSubscription>> {
        let row = Newsletters::find()
            .filter(newsletters::Column::Email.eq(email))
            .one(&self.orm)
            .await?;
        Ok(row.map(subscription_from_entity))
    }

    async fn insert_subscription(&self, email: &str) -> StoreResult<NewsletterSubscription> {
        let active = newsletters::ActiveModel {
            id: NotSet,
            email: Set(email.to_string()),
            subscribed_at: NotSet,
            is_active: Set(true),
        };
        let model = active
            .insert(&self.orm)
            .await
            .map_err(|e| conflict_or(e, || format!("subscription for '{email}'")))?;
        Ok(subscription_from_entity(model))
    }

    async fn insert_contact(&self, input: NewContactMessage) -> StoreResult<ContactMessage> {
        let active = contacts::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
            subject: Set(input.subject),
            message: Set(input.message),
            created_at: NotSet,
        };
        let model = active.insert(&self.orm).await?;
        Ok(ContactMessage {
            id: model.id,
            name: model.name,
            email: model.email,
            subject: model.subject,
            message: model.message,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }

    async fn insert_chat_message(&self, input: NewChatMessage) -> StoreResult<ChatMessage> {
        let active = chat_messages::ActiveModel {
            id: NotSet,
            session_id: Set(input.session_id),
            message: Set(input.message),
            response: Set(input.response),
            created_at: NotSet,
        };
        let model = active.insert(&self.orm).await?;
        Ok(chat_message_from_entity(model))
    }

    async fn list_chat_messages(&self, session_id: &str) -> StoreResult<Vec<ChatMessage>> {
        let rows = ChatMessages::find()
            .filter(chat_messages::Column::SessionId.eq(session_id))
            .order_by_asc(chat_messages::Column::CreatedAt)
            .order_by_asc(chat_messages::Column::Id)
            .all(&self.orm)
            .await?;
        Ok(rows.into_iter().map(chat_message_from_entity).collect())
    }
}

fn product_from_entity(model: products::Model) -> Product {
    Product {
        id: model.id,
        discount: discount_percent(model.price, model.original_price),
        name: model.name,
        description: model.description,
        category: model.category,
        price: model.price,
        original_price: model.original_price,
        rating: model.rating,
        image_url: model.image_url,
        affiliate_url: model.affiliate_url,
        is_active: model.is_active,
        is_featured: model.is_featured,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn category_from_entity(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        is_default: model.is_default,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn post_from_entity(model: blog_posts::Model) -> BlogPost {
    BlogPost {
        id: model.id,
        title: model.title,
        slug: model.slug,
        excerpt: model.excerpt,
        content: model.content,
        category: model.category,
        image_url: model.image_url,
        affiliate_url: model.affiliate_url,
        tags: model.tags,
        is_published: model.is_published,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn testimonial_from_entity(model: testimonials::Model) -> Testimonial {
    Testimonial {
        id: model.id,
        name: model.name,
        title: model.title,
        content: model.content,
        rating: model.rating,
        avatar_url: model.avatar_url,
        is_active: model.is_active,
    }
}

fn subscription_from_entity(model: newsletters::Model) -> NewsletterSubscription {
    NewsletterSubscription {
        id: model.id,
        email: model.email,
        subscribed_at: model.subscribed_at.with_timezone(&Utc),
        is_active: model.is_active,
    }
}

fn chat_message_from_entity(model: chat_messages::Model) -> ChatMessage {
    ChatMessage {
        id: model.id,
        session_id: model.session_id,
        message: model.message,
        response: model.response,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("laptop"), "%laptop%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
    }
}
