use axum::{extract::FromRequestParts, http::header};

use crate::{error::AppError, services::auth_service::verify_token, state::AppState};

/// Extractor guarding admin-only handlers.
///
/// A missing `Authorization` header is `Unauthorized`; a malformed, expired
/// or non-admin token is `Forbidden`.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub username: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Forbidden)?;
        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Forbidden)?;

        let claims = verify_token(&state.auth, token)?;
        Ok(AdminUser {
            username: claims.sub,
        })
    }
}
