//! HTTP API tests against the in-memory store

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{identity_token, send};

async fn seeded_app() -> axum::Router {
    common::app(common::seeded_store().await)
}

/// Id of a state by code, plus the id of one of its soil types by name
async fn location(app: &axum::Router, code: &str, soil: &str) -> (i64, i64) {
    let (_, states) = send(app, Method::GET, "/api/states", None, None).await;
    let state_id = states
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["code"] == code)
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let uri = format!("/api/soil-types/{}", state_id);
    let (_, soils) = send(app, Method::GET, &uri, None, None).await;
    let soil_id = soils
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == soil)
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    (state_id, soil_id)
}

// ============================================================================
// Public endpoints
// ============================================================================

#[tokio::test]
async fn health_reports_store_status() {
    let app = common::app(common::memory_store());
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn lists_states() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/api/states", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let states = body.as_array().unwrap();
    assert_eq!(states.len(), 9);
    assert!(states.iter().any(|s| s["code"] == "PB" && s["name"] == "Punjab"));
}

#[tokio::test]
async fn lists_soil_types_for_a_state() {
    let app = seeded_app().await;
    let (state_id, _) = location(&app, "MH", "Black Soil").await;

    let uri = format!("/api/soil-types/{}", state_id);
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;

    assert_eq!(status, StatusCode::OK);
    let soils = body.as_array().unwrap();
    assert_eq!(soils.len(), 2);
    assert!(soils.iter().all(|s| s["stateId"] == state_id));
}

#[tokio::test]
async fn non_numeric_state_id_is_rejected() {
    let app = seeded_app().await;
    let (status, _) = send(&app, Method::GET, "/api/soil-types/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn weather_is_cached_between_calls() {
    let app = seeded_app().await;
    let (state_id, _) = location(&app, "PB", "Alluvial Soil").await;
    let uri = format!("/api/weather/{}", state_id);

    let (status, first) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send(&app, Method::GET, &uri, None, None).await;

    assert_eq!(first["temperature"], second["temperature"]);
    assert_eq!(first["lastUpdated"], second["lastUpdated"]);
    assert_eq!(first["forecast"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn weather_for_unknown_state_is_not_found() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/api/weather/9999", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn init_is_idempotent() {
    let app = common::app(common::memory_store());

    let (status, first) = send(&app, Method::GET, "/api/init", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send(&app, Method::GET, "/api/init", None, None).await;

    assert_eq!(first["states"], 9);
    assert_eq!(first["soilTypes"], 18);
    assert_eq!(first["crops"], 10);
    assert_eq!(first["states"], second["states"]);
    assert_eq!(first["soilTypes"], second["soilTypes"]);
    assert_eq!(first["crops"], second["crops"]);
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn missing_token_redirects_to_login() {
    let app = seeded_app().await;
    let request = Request::builder()
        .uri("/api/crop-recommendations")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/api/login");
}

#[tokio::test]
async fn forged_token_redirects_to_login() {
    let app = seeded_app().await;
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/auth/user",
        Some("not-a-real-token"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FOUND);
}

#[tokio::test]
async fn profile_is_created_on_first_access() {
    let app = seeded_app().await;
    let token = identity_token("farmer-1");

    let (status, body) = send(&app, Method::GET, "/api/auth/user", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "farmer-1");
    assert_eq!(body["email"], "farmer-1@example.com");
    assert_eq!(body["selectedStateId"], Value::Null);

    // A second read keeps the same profile
    let (_, again) = send(&app, Method::GET, "/api/auth/user", Some(&token), None).await;
    assert_eq!(again["createdAt"], body["createdAt"]);
}

// ============================================================================
// Location and recommendations
// ============================================================================

#[tokio::test]
async fn empty_state_is_a_field_error() {
    let app = seeded_app().await;
    let token = identity_token("farmer-1");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/user/location",
        Some(&token),
        Some(json!({ "selectedState": "", "selectedSoilType": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "selectedState");
}

#[tokio::test]
async fn missing_state_field_is_a_field_error() {
    let app = seeded_app().await;
    let token = identity_token("farmer-1");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/user/location",
        Some(&token),
        Some(json!({ "selectedSoilType": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "selectedState");
}

#[tokio::test]
async fn numeric_ids_are_a_field_error() {
    let app = seeded_app().await;
    let token = identity_token("farmer-1");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/user/location",
        Some(&token),
        Some(json!({ "selectedState": 1, "selectedSoilType": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "selectedState");
}

#[tokio::test]
async fn location_body_without_content_type_is_rejected() {
    let app = seeded_app().await;
    let token = identity_token("farmer-1");
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/user/location")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(
            json!({ "selectedState": "1", "selectedSoilType": "1" }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = seeded_app().await;
    let token = identity_token("farmer-1");
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/user/location")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"selectedState\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejected_location_keeps_previous_selection() {
    let app = seeded_app().await;
    let token = identity_token("farmer-4");
    let (punjab, alluvial) = location(&app, "PB", "Alluvial Soil").await;
    let (_, black) = location(&app, "MH", "Black Soil").await;

    send(
        &app,
        Method::PATCH,
        "/api/user/location",
        Some(&token),
        Some(json!({
            "selectedState": punjab.to_string(),
            "selectedSoilType": alluvial.to_string(),
        })),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/user/location",
        Some(&token),
        Some(json!({
            "selectedState": punjab.to_string(),
            "selectedSoilType": black.to_string(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, user) = send(&app, Method::GET, "/api/auth/user", Some(&token), None).await;
    assert_eq!(user["selectedStateId"], punjab);
    assert_eq!(user["selectedSoilTypeId"], alluvial);

    let (_, recs) = send(
        &app,
        Method::GET,
        "/api/crop-recommendations",
        Some(&token),
        None,
    )
    .await;
    let recs = recs.as_array().unwrap();
    assert_eq!(recs.len(), 10);
    assert!(recs.iter().all(|r| r["soilTypeId"] == alluvial));
}

#[tokio::test]
async fn soil_from_another_state_is_rejected() {
    let app = seeded_app().await;
    let token = identity_token("farmer-1");
    let (punjab, _) = location(&app, "PB", "Alluvial Soil").await;
    let (_, black) = location(&app, "MH", "Black Soil").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/user/location",
        Some(&token),
        Some(json!({
            "selectedState": punjab.to_string(),
            "selectedSoilType": black.to_string(),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "selectedSoilType");
}

#[tokio::test]
async fn location_update_generates_recommendations() {
    let app = seeded_app().await;
    let token = identity_token("farmer-1");
    let (state_id, soil_id) = location(&app, "PB", "Alluvial Soil").await;

    let (status, user) = send(
        &app,
        Method::PATCH,
        "/api/user/location",
        Some(&token),
        Some(json!({
            "selectedState": state_id.to_string(),
            "selectedSoilType": soil_id.to_string(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["selectedStateId"], state_id);
    assert_eq!(user["selectedSoilTypeId"], soil_id);

    let (status, recs) = send(
        &app,
        Method::GET,
        "/api/crop-recommendations",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let recs = recs.as_array().unwrap();
    assert_eq!(recs.len(), 10);
    for rec in recs {
        assert_eq!(rec["state"]["code"], "PB");
        assert_eq!(rec["soilType"]["name"], "Alluvial Soil");
        assert!(rec["crop"]["name"].is_string());
        assert!(rec["advice"]["irrigation"].is_string());
    }

    let rice = recs.iter().find(|r| r["crop"]["name"] == "Rice").unwrap();
    assert!(rice["compatibilityScore"].as_i64().unwrap() >= 80);
}

#[tokio::test]
async fn regenerate_requires_a_selection() {
    let app = seeded_app().await;
    let token = identity_token("farmer-2");

    // Create the profile without choosing a location
    send(&app, Method::GET, "/api/auth/user", Some(&token), None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/crop-recommendations/generate",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn regenerate_replaces_the_set() {
    let app = seeded_app().await;
    let token = identity_token("farmer-3");
    let (state_id, soil_id) = location(&app, "RJ", "Desert Soil").await;

    send(
        &app,
        Method::PATCH,
        "/api/user/location",
        Some(&token),
        Some(json!({
            "selectedState": state_id.to_string(),
            "selectedSoilType": soil_id.to_string(),
        })),
    )
    .await;

    let (status, generated) = send(
        &app,
        Method::POST,
        "/api/crop-recommendations/generate",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(generated.as_array().unwrap().len(), 10);

    let (_, listed) = send(
        &app,
        Method::GET,
        "/api/crop-recommendations",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 10);
}
