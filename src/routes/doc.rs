use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AdminProfile, LoginRequest, LoginResponse},
        blog::{CreateBlogPostRequest, PublishRequest, UpdateBlogPostRequest},
        categories::CreateCategoryRequest,
        chat::{ChatReply, ChatRequest, RecommendationList, RecommendationRequest},
        engagement::{ContactRequest, SubscribeRequest},
        products::{CreateProductRequest, UpdateProductRequest},
    },
    models::{
        BlogPost, Category, ChatMessage, ContactMessage, NewsletterSubscription, Product,
        Testimonial,
    },
    response::{ApiResponse, Meta},
    routes::{admin, blog, categories, chat, engagement, health, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::list_featured,
        products::search_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        categories::list_categories,
        categories::create_category,
        blog::list_published,
        blog::list_all,
        blog::get_post_by_slug,
        blog::get_post,
        blog::list_by_category,
        blog::create_post,
        blog::update_post,
        blog::set_published,
        blog::delete_post,
        chat::chat,
        chat::recommendations,
        chat::history,
        engagement::list_testimonials,
        engagement::subscribe,
        engagement::contact,
        admin::login,
        admin::verify
    ),
    components(
        schemas(
            Product,
            Category,
            BlogPost,
            Testimonial,
            NewsletterSubscription,
            ContactMessage,
            ChatMessage,
            CreateProductRequest,
            UpdateProductRequest,
            CreateCategoryRequest,
            CreateBlogPostRequest,
            UpdateBlogPostRequest,
            PublishRequest,
            ChatRequest,
            ChatReply,
            RecommendationRequest,
            RecommendationList,
            SubscribeRequest,
            ContactRequest,
            LoginRequest,
            LoginResponse,
            AdminProfile,
            products::ProductListResponse,
            categories::CategoryListResponse,
            blog::BlogPostListResponse,
            chat::ChatHistoryResponse,
            engagement::TestimonialListResponse,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<Category>,
            ApiResponse<BlogPost>,
            ApiResponse<ChatReply>,
            ApiResponse<LoginResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Blog", description = "Blog post endpoints"),
        (name = "Chat", description = "Shopping assistant endpoints"),
        (name = "Engagement", description = "Testimonials, newsletter and contact endpoints"),
        (name = "Admin", description = "Admin authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
