//! Tests for the /settings endpoints.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

mod common;
use common::*;

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .expect("timestamp should be RFC 3339")
}

#[tokio::test]
async fn test_first_read_returns_full_default_document() {
    let app = app(create_test_app_state());

    let (status, json) = get(&app, "/settings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "site_settings");
    assert_eq!(json["showUpdateBanner"], true);
    assert_eq!(json["defaultTheme"], "light");
    assert_eq!(json["pricing"].as_array().unwrap().len(), 4);
    assert_eq!(json["faqs"].as_array().unwrap().len(), 6);
    assert_eq!(json["faqs"][0]["q"], "Can I use multiple devices?");
    assert!(json["createdAt"].is_string());
    assert!(json["updatedAt"].is_string());
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let app = app(create_test_app_state());

    let (_, first) = get(&app, "/settings").await;
    let (_, second) = get(&app, "/settings").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_update_then_read_round_trip() {
    let app = app(create_test_app_state());

    let (status, json) = put_settings(
        &app,
        json!({ "bannerText": "Sale!", "showUpdateBanner": false }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let saved = &json["settings"];
    assert_eq!(saved["bannerText"], "Sale!");
    assert_eq!(saved["showUpdateBanner"], false);
    assert_eq!(saved["id"], "site_settings");
    assert!(saved["updatedAt"].is_string());

    let (status, current) = get(&app, "/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&current, saved);
    // Untouched fields come from the defaults
    assert_eq!(current["heroTitle1"], "Stream everything.");
    assert_eq!(current["pricing"].as_array().unwrap().len(), 4);
    assert_eq!(current["faqs"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_post_is_accepted_like_put() {
    let app = app(create_test_app_state());

    let (status, json) = send(
        &app,
        "POST",
        "/settings",
        Some(json!({ "accentColor": "#00FF00" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["settings"]["accentColor"], "#00FF00");
}

#[tokio::test]
async fn test_identity_is_pinned() {
    let app = app(create_test_app_state());

    let (status, json) = put_settings(
        &app,
        json!({ "id": "something-else", "bannerText": "Hi" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["settings"]["id"], "site_settings");

    let (_, current) = get(&app, "/settings").await;
    assert_eq!(current["id"], "site_settings");
}

#[tokio::test]
async fn test_updated_at_never_decreases_and_created_at_is_kept() {
    let app = app(create_test_app_state());

    let (_, initial) = get(&app, "/settings").await;
    let created_at = initial["createdAt"].clone();

    let (_, first) = put_settings(&app, json!({ "bannerText": "One" })).await;
    let (_, second) = put_settings(
        &app,
        json!({ "bannerText": "Two", "createdAt": "2000-01-01T00:00:00Z" }),
    )
    .await;

    let first_updated = timestamp(&first["settings"]["updatedAt"]);
    let second_updated = timestamp(&second["settings"]["updatedAt"]);
    assert!(second_updated >= first_updated);
    assert!(first_updated >= timestamp(&initial["updatedAt"]));

    assert_eq!(
        timestamp(&second["settings"]["createdAt"]),
        timestamp(&created_at)
    );
}

#[tokio::test]
async fn test_omitted_fields_reset_to_defaults_by_default() {
    let app = app(create_test_app_state());

    put_settings(&app, json!({ "bannerText": "Custom banner" })).await;
    let (_, json) = put_settings(&app, json!({ "heroTitle1": "Custom hero" })).await;

    assert_eq!(json["settings"]["heroTitle1"], "Custom hero");
    assert_eq!(
        json["settings"]["bannerText"],
        "🎉 NEW 2026 Updates: 4K HDR, Dolby Atmos & 50+ New Channels!"
    );
}

#[tokio::test]
async fn test_stored_merge_base_keeps_previous_values() {
    let app = app(create_test_app_state_with(MergeBase::Stored, false));

    put_settings(&app, json!({ "bannerText": "Custom banner" })).await;
    let (_, json) = put_settings(&app, json!({ "heroTitle1": "Custom hero" })).await;

    assert_eq!(json["settings"]["heroTitle1"], "Custom hero");
    assert_eq!(json["settings"]["bannerText"], "Custom banner");
}

#[tokio::test]
async fn test_pricing_and_faqs_are_replaced_in_order() {
    let app = app(create_test_app_state());

    let pricing = json!([
        { "duration": "1 Year", "price": "89.99", "original": "140", "monthly": "7.50", "bestValue": true },
        { "duration": "1 Year", "price": "99.99", "original": "140", "monthly": "8.33" }
    ]);
    let faqs = json!([{ "q": "Is there a trial?", "a": "Yes, 24 hours." }]);

    let (status, json) = put_settings(&app, json!({ "pricing": pricing, "faqs": faqs })).await;

    assert_eq!(status, StatusCode::OK);
    let plans = json["settings"]["pricing"].as_array().unwrap();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0]["price"], "89.99");
    assert_eq!(plans[0]["bestValue"], true);
    assert_eq!(plans[1]["price"], "99.99");
    assert!(plans[1].get("link").is_none());
    assert_eq!(json["settings"]["faqs"], faqs);
}

#[tokio::test]
async fn test_unknown_fields_are_kept() {
    let app = app(create_test_app_state());

    put_settings(&app, json!({ "instagramHandle": "@iptvusca" })).await;
    let (_, current) = get(&app, "/settings").await;

    assert_eq!(current["instagramHandle"], "@iptvusca");
}

#[tokio::test]
async fn test_wrong_field_type_is_rejected_and_not_saved() {
    let app = app(create_test_app_state());

    let (status, json) = put_settings(
        &app,
        json!({ "bannerText": "Should not land", "showPopup": "yes" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Invalid settings"));

    let (_, current) = get(&app, "/settings").await;
    assert_ne!(current["bannerText"], "Should not land");
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let app = app(create_test_app_state());

    let (status, json) = put_settings(&app, json!(["bannerText", "Sale!"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Settings must be a JSON object");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let app = app(create_test_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/settings")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let app = app(create_test_app_state_with(MergeBase::Stored, false));

    put_settings(&app, json!({ "bannerText": "Custom", "showPopup": true })).await;
    let (status, json) = send(&app, "POST", "/settings/reset", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["settings"]["showPopup"], false);

    let (_, current) = get(&app, "/settings").await;
    assert_eq!(current["showPopup"], false);
    assert_eq!(current["popupTitle"], "Special Offer!");
}

#[tokio::test]
async fn test_storage_failure_is_generic_internal_error() {
    use std::sync::Arc;

    use iptvusca_site::db::{MemoryBackend, SettingsBackend};
    use iptvusca_site::models::SETTINGS_ID;

    let backend = Arc::new(MemoryBackend::new());
    backend
        .upsert(
            SETTINGS_ID,
            json!({ "faqs": "not a list" }).as_object().unwrap(),
        )
        .unwrap();
    let state = AppState::new(
        SettingsStore::new(backend, MergeBase::Stored),
        AdminGate::new(TEST_PASSWORD),
        false,
    );
    let app = app(state);

    let (status, json) = get(&app, "/settings").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Internal server error" }));

    let (status, json) = put_settings(&app, json!({ "bannerText": "Sale!" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Internal server error" }));
}
