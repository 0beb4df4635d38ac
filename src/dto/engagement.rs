use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, store::NewContactMessage};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubscribeRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

impl SubscribeRequest {
    /// Emails are compared case-insensitively by storing them lowercased.
    pub fn normalized_email(self) -> AppResult<String> {
        self.validate()?;
        Ok(self.email.trim().to_lowercase())
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 200, message = "subject must be 1-200 characters"))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "message must be 1-5000 characters"))]
    pub message: String,
}

impl ContactRequest {
    pub fn into_new(self) -> AppResult<NewContactMessage> {
        self.validate()?;
        Ok(NewContactMessage {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
        })
    }
}
