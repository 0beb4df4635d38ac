use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::check_not_blank;
use crate::error::AppResult;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "message must be 1-2000 characters"))]
    pub message: String,
    #[validate(length(min = 1, max = 128, message = "sessionId must be 1-128 characters"))]
    pub session_id: String,
}

impl ChatRequest {
    pub fn checked(self) -> AppResult<Self> {
        self.validate()?;
        check_not_blank("message", &self.message)?;
        check_not_blank("sessionId", &self.session_id)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecommendationRequest {
    pub query: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationList {
    pub recommendations: Vec<String>,
}
