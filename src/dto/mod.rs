use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

pub mod auth;
pub mod blog;
pub mod categories;
pub mod chat;
pub mod engagement;
pub mod products;

const MAX_PRICE: i64 = 99_999_999;
const MAX_RATING: i64 = 5;

/// Money fields: positive, at most two decimal places, fits NUMERIC(10, 2).
pub(crate) fn check_price(field: &str, value: Decimal) -> AppResult<()> {
    if value <= Decimal::ZERO {
        return Err(AppError::InvalidInput(format!("{field} must be greater than 0")));
    }
    if value.normalize().scale() > 2 {
        return Err(AppError::InvalidInput(format!(
            "{field} must have at most 2 decimal places"
        )));
    }
    if value > Decimal::from(MAX_PRICE) {
        return Err(AppError::InvalidInput(format!("{field} is too large")));
    }
    Ok(())
}

pub(crate) fn check_rating(value: Decimal) -> AppResult<()> {
    if value < Decimal::ZERO || value > Decimal::from(MAX_RATING) {
        return Err(AppError::InvalidInput("rating must be between 0 and 5".into()));
    }
    if value.normalize().scale() > 2 {
        return Err(AppError::InvalidInput(
            "rating must have at most 2 decimal places".into(),
        ));
    }
    Ok(())
}

pub(crate) fn check_not_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Fixed segments under `/api/blog` that a slug would be shadowed by.
pub const RESERVED_SLUGS: [&str; 3] = ["all", "id", "category"];

/// Slugs are lowercase ASCII words joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !RESERVED_SLUGS.contains(&slug)
        && slug.len() <= 200
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}
