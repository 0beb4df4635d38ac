use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    store::{NewProduct, ProductPatch},
};

use super::{check_not_blank, check_price, check_rating};

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,
    #[schema(value_type = String, example = "299.00")]
    pub price: Decimal,
    #[schema(value_type = Option<String>, example = "399.00")]
    pub original_price: Option<Decimal>,
    /// Defaults to 5.0.
    #[schema(value_type = Option<String>, example = "4.8")]
    pub rating: Option<Decimal>,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: String,
    #[validate(url(message = "affiliateUrl must be a valid URL"))]
    pub affiliate_url: String,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl CreateProductRequest {
    pub fn into_new(self) -> AppResult<NewProduct> {
        self.validate()?;
        check_not_blank("name", &self.name)?;
        check_not_blank("category", &self.category)?;
        check_price("price", self.price)?;
        if let Some(original_price) = self.original_price {
            check_price("originalPrice", original_price)?;
        }
        let rating = self.rating.unwrap_or_else(|| Decimal::new(50, 1));
        check_rating(rating)?;

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            description: self.description,
            category: self.category.trim().to_string(),
            price: self.price,
            original_price: self.original_price,
            rating,
            image_url: self.image_url,
            affiliate_url: self.affiliate_url,
            is_active: self.is_active.unwrap_or(true),
            is_featured: self.is_featured.unwrap_or(false),
        })
    }
}

/// Partial update: only the fields present in the body are changed.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub original_price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub rating: Option<Decimal>,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(url(message = "affiliateUrl must be a valid URL"))]
    pub affiliate_url: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> AppResult<ProductPatch> {
        self.validate()?;
        if let Some(name) = &self.name {
            check_not_blank("name", name)?;
        }
        if let Some(category) = &self.category {
            check_not_blank("category", category)?;
        }
        if let Some(price) = self.price {
            check_price("price", price)?;
        }
        if let Some(original_price) = self.original_price {
            check_price("originalPrice", original_price)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }

        Ok(ProductPatch {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description,
            category: self.category.map(|c| c.trim().to_string()),
            price: self.price,
            original_price: self.original_price,
            rating: self.rating,
            image_url: self.image_url,
            affiliate_url: self.affiliate_url,
            is_active: self.is_active,
            is_featured: self.is_featured,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FeaturedQuery {
    /// Maximum number of products, default 6.
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name, description and category.
    pub q: Option<String>,
}
