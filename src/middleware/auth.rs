use crate::{
    AppState,
    config::AuthConfig,
    db::{enums::UserRole, models::User, run_blocking},
    error::{AppError, AppResult},
};
use axum::{TypedHeader, async_trait, extract::FromRequestParts, http::request::Parts};
use headers::{Authorization, authorization::Bearer};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid, // user_id
    pub email: String,
    pub role: UserRole,
    pub exp: u64,    // expiration time
    pub iat: u64,    // issued at
    pub jti: String, // JWT ID
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expires_in: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expires_in: config.access_token_expires_in,
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp().max(0) as u64;
        self.encode_claims(&Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: now + self.expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        })
    }

    pub fn encode_claims(&self, claims: &Claims) -> AppResult<String> {
        Ok(encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// The authenticated caller. Resolving it rejects with 401 before the
/// handler runs, so no body is parsed and nothing is persisted.
#[derive(Clone, Debug)]
pub struct SessionUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Missing or invalid authorization header"))?;

        let claims = state.tokens.verify_token(bearer.token())?;

        let store = state.store.clone();
        let user = run_blocking(move || store.find_user_by_id(claims.sub))
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        Ok(SessionUser(user))
    }
}
