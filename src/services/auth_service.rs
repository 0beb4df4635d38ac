use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;

use crate::{
    config::AuthConfig,
    dto::auth::{AdminProfile, Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const ADMIN_ROLE: &str = "admin";
const TOKEN_TTL_HOURS: i64 = 24;

pub fn hash_password(plain: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string())
}

pub fn issue_token(auth: &AuthConfig, username: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: username.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Decodes a bearer token. Any failure, including an expired token or a
/// non-admin role, is `Forbidden`.
pub fn verify_token(auth: &AuthConfig, token: &str) -> AppResult<Claims> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Forbidden)?;

    if decoded.claims.role != ADMIN_ROLE {
        return Err(AppError::Forbidden);
    }
    Ok(decoded.claims)
}

pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;
    let auth = state.auth.as_ref();

    let Some(stored_hash) = auth.admin_password_hash.as_deref() else {
        tracing::warn!("admin login attempted but no admin password is configured");
        return Err(AppError::Unauthorized);
    };

    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let password_ok = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    if username != auth.admin_username || !password_ok {
        tracing::info!(username = %username, "admin login rejected");
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(auth, &username)?;
    tracing::info!(username = %username, "admin logged in");

    let resp = LoginResponse {
        token,
        user: AdminProfile {
            username,
            role: ADMIN_ROLE.to_string(),
        },
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            admin_username: "admin".to_string(),
            admin_password_hash: Some(hash_password("hunter2").unwrap()),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let auth = auth_config();
        let token = issue_token(&auth, "admin").unwrap();
        let claims = verify_token(&auth, &token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, ADMIN_ROLE);
    }

    #[test]
    fn token_signed_with_other_secret_is_forbidden() {
        let auth = auth_config();
        let other = AuthConfig {
            jwt_secret: "another-secret".to_string(),
            ..auth_config()
        };
        let token = issue_token(&other, "admin").unwrap();
        assert!(matches!(verify_token(&auth, &token), Err(AppError::Forbidden)));
    }

    #[test]
    fn garbage_token_is_forbidden() {
        assert!(matches!(
            verify_token(&auth_config(), "not-a-jwt"),
            Err(AppError::Forbidden)
        ));
    }
}
