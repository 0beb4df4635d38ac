//! Sample catalog, testimonials and blog posts.
//!
//! Seeding is idempotent: rows are matched by product name, category name,
//! testimonial author and post slug, and only missing ones are inserted.

use rust_decimal::Decimal;

use crate::store::{
    NewBlogPost, NewCategory, NewProduct, NewTestimonial, Store, StoreError, StoreResult,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub products: usize,
    pub categories: usize,
    pub testimonials: usize,
    pub posts: usize,
}

const DEFAULT_CATEGORIES: [&str; 5] = [
    "Audio & Electronics",
    "Health & Fitness",
    "Smart Home",
    "Technology",
    "Audio",
];

fn money(units: i64) -> Decimal {
    Decimal::new(units * 100, 2)
}

fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Premium Wireless Headphones".into(),
            description: "Industry-leading noise cancellation with premium sound quality and 30-hour battery life.".into(),
            category: "Audio & Electronics".into(),
            price: money(299),
            original_price: Some(money(399)),
            rating: Decimal::new(48, 1),
            image_url: "https://images.unsplash.com/photo-1593642702749-b7d2a804fbcf?auto=format&fit=crop&w=400&h=300".into(),
            affiliate_url: "https://example.com/go/premium-wireless-headphones".into(),
            is_active: true,
            is_featured: true,
        },
        NewProduct {
            name: "Smart Fitness Tracker".into(),
            description: "Advanced health monitoring with GPS tracking, heart rate monitoring, and 7-day battery life.".into(),
            category: "Health & Fitness".into(),
            price: money(199),
            original_price: Some(money(249)),
            rating: Decimal::new(46, 1),
            image_url: "https://images.unsplash.com/photo-1575311373937-040b8e1fd5b6?auto=format&fit=crop&w=400&h=300".into(),
            affiliate_url: "https://example.com/go/smart-fitness-tracker".into(),
            is_active: true,
            is_featured: true,
        },
        NewProduct {
            name: "Smart Home Hub".into(),
            description: "Complete home automation control with voice commands, app integration, and energy monitoring.".into(),
            category: "Smart Home".into(),
            price: money(149),
            original_price: Some(money(199)),
            rating: Decimal::new(49, 1),
            image_url: "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?auto=format&fit=crop&w=400&h=300".into(),
            affiliate_url: "https://example.com/go/smart-home-hub".into(),
            is_active: true,
            is_featured: false,
        },
    ]
}

fn sample_testimonials() -> Vec<NewTestimonial> {
    vec![
        NewTestimonial {
            name: "Sarah M.".into(),
            title: "Software Engineer".into(),
            content: "The assistant helped me find the right laptop for my needs. Saved me hours of research and stayed within my budget.".into(),
            rating: 5,
            avatar_url: Some("https://images.unsplash.com/photo-1494790108755-2616b612b172?auto=format&fit=crop&w=50&h=50".into()),
        },
        NewTestimonial {
            name: "Mike R.".into(),
            title: "Fitness Enthusiast".into(),
            content: "Detailed product comparisons that made it clear which fitness tracker suited my workout routine.".into(),
            rating: 5,
            avatar_url: Some("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=50&h=50".into()),
        },
        NewTestimonial {
            name: "Jennifer L.".into(),
            title: "Marketing Manager".into(),
            content: "Honest, detailed reviews and recommendations that are spot on.".into(),
            rating: 5,
            avatar_url: Some("https://images.unsplash.com/photo-1438761681033-6461ffad8d80?auto=format&fit=crop&w=50&h=50".into()),
        },
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

fn sample_posts() -> Vec<NewBlogPost> {
    vec![
        NewBlogPost {
            title: "Best Tech Products of 2024: AI-Powered Review".into(),
            slug: "best-tech-products-2024-ai-review".into(),
            excerpt: "The top tech picks for 2024, from smartphones to smart home devices.".into(),
            content: "Technology continues to evolve at breakneck speed in 2024...".into(),
            category: "Technology".into(),
            image_url: "https://images.unsplash.com/photo-1518709268805-4e9042af2176?auto=format&fit=crop&w=800&h=400".into(),
            affiliate_url: None,
            tags: tags(&["tech", "ai", "review", "2024"]),
            is_published: true,
        },
        NewBlogPost {
            title: "How to Choose the Perfect Headphones: Complete Guide".into(),
            slug: "how-to-choose-perfect-headphones-guide".into(),
            excerpt: "From noise cancellation to sound quality, a guide to finding the right headphones.".into(),
            content: "Choosing the right headphones can make all the difference...".into(),
            category: "Audio".into(),
            image_url: "https://images.unsplash.com/photo-1583394838336-acd977736f90?auto=format&fit=crop&w=800&h=400".into(),
            affiliate_url: None,
            tags: tags(&["headphones", "audio", "guide", "buying"]),
            is_published: true,
        },
        NewBlogPost {
            title: "Smart Home Automation: Getting Started".into(),
            slug: "smart-home-automation-getting-started".into(),
            excerpt: "A beginner-friendly guide to home automation and connected devices.".into(),
            content: "Smart home technology has become more accessible than ever...".into(),
            category: "Smart Home".into(),
            image_url: "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?auto=format&fit=crop&w=800&h=400".into(),
            affiliate_url: None,
            tags: tags(&["smart home", "automation", "iot", "guide"]),
            is_published: true,
        },
    ]
}

pub async fn seed_store(store: &dyn Store) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    for name in DEFAULT_CATEGORIES {
        if store.find_category_by_name(name).await?.is_some() {
            continue;
        }
        let input = NewCategory {
            name: name.to_string(),
            is_default: true,
        };
        match store.insert_category(input).await {
            Ok(_) => report.categories += 1,
            Err(StoreError::Conflict(_)) => {}
            Err(err) => return Err(err),
        }
    }

    let existing_products = store.list_active_products().await?;
    for product in sample_products() {
        if existing_products.iter().any(|p| p.name == product.name) {
            continue;
        }
        store.insert_product(product).await?;
        report.products += 1;
    }

    let existing_testimonials = store.list_active_testimonials().await?;
    for testimonial in sample_testimonials() {
        if existing_testimonials.iter().any(|t| t.name == testimonial.name) {
            continue;
        }
        store.insert_testimonial(testimonial).await?;
        report.testimonials += 1;
    }

    for post in sample_posts() {
        if store.find_post_by_slug(&post.slug).await?.is_some() {
            continue;
        }
        match store.insert_post(post).await {
            Ok(_) => report.posts += 1,
            Err(StoreError::Conflict(_)) => {}
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        products = report.products,
        categories = report.categories,
        testimonials = report.testimonials,
        posts = report.posts,
        "sample data seeded"
    );
    Ok(report)
}
