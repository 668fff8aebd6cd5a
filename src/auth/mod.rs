//! Bearer-token authentication. Every entity endpoint sits behind
//! [`AuthUser`]; tokens are issued by the login endpoint against the
//! credentials in the configuration.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Validates the configured credentials and issues a token.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ServiceError> {
        if username != self.config.admin_username || password != self.config.admin_password {
            return Err(ServiceError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }
        let token = self.issue_token(username)?;
        Ok(LoginResponse {
            token,
            expires_in: self.config.token_ttl_secs,
        })
    }

    pub fn issue_token(&self, subject: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.token_ttl_secs)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

/// Extractor asserting a valid `Authorization: Bearer` token on the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
}

#[async_trait]
impl FromRequestParts<crate::AppState> for AuthUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ServiceError::Unauthorized("Missing Authorization header".to_string())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ServiceError::Unauthorized("Authorization header must be a Bearer token".to_string())
        })?;

        let claims = state.auth.verify(token)?;
        Ok(AuthUser {
            subject: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn auth() -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: "test-secret-key-used-only-in-unit-tests".into(),
            token_ttl_secs: 3600,
            admin_username: "admin".into(),
            admin_password: "s3nha".into(),
        })
    }

    #[test]
    fn login_roundtrip_verifies() {
        let auth = auth();
        let login = auth.login("admin", "s3nha").unwrap();
        let claims = auth.verify(&login.token).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn bad_credentials_are_unauthorized() {
        let err = auth().login("admin", "wrong").unwrap_err();
        assert_matches!(err, ServiceError::Unauthorized(_));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let auth = auth();
        let login = auth.login("admin", "s3nha").unwrap();
        let mut token = login.token;
        token.push('x');
        assert_matches!(auth.verify(&token), Err(ServiceError::JwtError(_)));
    }
}
