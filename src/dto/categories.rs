use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, store::NewCategory};

use super::check_not_blank;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub is_default: Option<bool>,
}

impl CreateCategoryRequest {
    pub fn into_new(self) -> AppResult<NewCategory> {
        self.validate()?;
        check_not_blank("name", &self.name)?;
        Ok(NewCategory {
            name: self.name.trim().to_string(),
            is_default: self.is_default.unwrap_or(false),
        })
    }
}
