//! Authentication middleware
//!
//! Sign-in happens at the external OpenID Connect provider. Requests carry the
//! provider's ID token as a bearer token; this module verifies it and exposes
//! the identity to handlers.

use axum::{
    extract::{Request, State},
    http::{header::LOCATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::AppState;
use shared::UpsertUser;

/// Authenticated identity extracted from the ID token
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Identity provider subject, used as the user id
    pub subject: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl AuthUser {
    /// Profile fields to write on login
    pub fn to_upsert(&self) -> UpsertUser {
        UpsertUser {
            id: self.subject.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            profile_image_url: self.profile_image_url.clone(),
        }
    }
}

/// ID token claims issued by the identity provider
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

impl From<IdentityClaims> for AuthUser {
    fn from(claims: IdentityClaims) -> Self {
        AuthUser {
            subject: claims.sub,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            profile_image_url: claims.profile_image_url,
        }
    }
}

/// Authentication middleware for protected routes
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth = &state.config.auth;

    let token = match request.headers().typed_get::<Authorization<Bearer>>() {
        Some(Authorization(bearer)) => bearer.token().to_string(),
        None => return login_redirect(&auth.login_url),
    };

    let claims = match decode_identity_token(&token, auth) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Rejected identity token: {}", e);
            return login_redirect(&auth.login_url);
        }
    };

    if claims.sub.trim().is_empty() {
        return login_redirect(&auth.login_url);
    }

    request.extensions_mut().insert(AuthUser::from(claims));

    next.run(request).await
}

/// Verify signature, expiry and (when configured) issuer and audience
pub fn decode_identity_token(
    token: &str,
    config: &AuthConfig,
) -> Result<IdentityClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);

    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(config.token_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Send the client to the sign-in flow
fn login_redirect(login_url: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, login_url.to_string())]).into_response()
}

/// Extractor for the authenticated user
/// Use this in handlers behind `auth_middleware`
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| login_redirect(&state.config.auth.login_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn config() -> AuthConfig {
        AuthConfig {
            token_secret: "test-secret".to_string(),
            login_url: "/api/login".to_string(),
            issuer: None,
            audience: None,
        }
    }

    fn token(secret: &str, exp: i64) -> String {
        let claims = IdentityClaims {
            sub: "12345".to_string(),
            email: Some("farmer@example.com".to_string()),
            first_name: Some("Asha".to_string()),
            last_name: None,
            profile_image_url: None,
            exp,
            iat: None,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn valid_token_decodes() {
        let claims = decode_identity_token(&token("test-secret", future()), &config()).unwrap();
        let user = AuthUser::from(claims);
        assert_eq!(user.subject, "12345");
        assert_eq!(user.to_upsert().email.as_deref(), Some("farmer@example.com"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        assert!(decode_identity_token(&token("other", future()), &config()).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let past = chrono::Utc::now().timestamp() - 3600;
        assert!(decode_identity_token(&token("test-secret", past), &config()).is_err());
    }

    #[test]
    fn issuer_is_checked_when_configured() {
        let mut cfg = config();
        cfg.issuer = Some("https://id.example.com".to_string());
        assert!(decode_identity_token(&token("test-secret", future()), &cfg).is_err());
    }
}
