//! Helpers shared by the integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crop_adviser::config::{
    AuthConfig, Config, DatabaseConfig, SeedConfig, ServerConfig, StorageBackend, StorageConfig,
    WeatherConfig,
};
use crop_adviser::middleware::auth::IdentityClaims;
use crop_adviser::services::SeedService;
use crop_adviser::store::{DynStore, MemoryStore};
use crop_adviser::{create_app, AppState};

pub const TOKEN_SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        storage: StorageConfig {
            backend: StorageBackend::Memory,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/unused".to_string(),
            max_connections: 1,
            min_connections: 0,
        },
        auth: AuthConfig {
            token_secret: TOKEN_SECRET.to_string(),
            login_url: "/api/login".to_string(),
            issuer: None,
            audience: None,
        },
        weather: WeatherConfig::default(),
        seed: SeedConfig { on_startup: false },
    }
}

pub fn memory_store() -> DynStore {
    Arc::new(MemoryStore::new())
}

pub async fn seeded_store() -> DynStore {
    let store = memory_store();
    SeedService::new(store.clone()).seed().await.unwrap();
    store
}

pub fn app(store: DynStore) -> Router {
    create_app(AppState::new(store, test_config()))
}

/// Sign an ID token the way the identity provider would
pub fn identity_token(subject: &str) -> String {
    let claims = IdentityClaims {
        sub: subject.to_string(),
        email: Some(format!("{}@example.com", subject)),
        first_name: Some("Test".to_string()),
        last_name: Some("Farmer".to_string()),
        profile_image_url: None,
        exp: chrono::Utc::now().timestamp() + 3600,
        iat: Some(chrono::Utc::now().timestamp()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TOKEN_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Send a request and return the status with the parsed JSON body (Null if empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
