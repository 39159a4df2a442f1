mod common;

use axum::http::StatusCode;
use serde_json::json;

fn platform_body(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "platform_logo": {
            "url": "https://images.example/snes.png",
            "width": 250.0,
            "height": 90.0,
        },
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Create
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_platform_derives_slug_and_round_trips() {
    let (app, _state) = common::test_app().await;

    let (status, body) =
        common::post_json(&app, "/platforms", &platform_body("Super Nintendo")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let created: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(created["name"], "Super Nintendo");
    assert_eq!(created["slug"], "super-nintendo");
    assert_eq!(created["platform_logo"]["width"], 250.0);

    let (status, body) = common::get_json(&app, "/platforms/super-nintendo").await;
    assert_eq!(status, StatusCode::OK);
    let fetched: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(fetched["name"], "Super Nintendo");
    assert_eq!(fetched["slug"], "super-nintendo");
}

#[tokio::test]
async fn create_platform_rejects_missing_fields() {
    let (app, _state) = common::test_app().await;

    let (status, body) = common::post_json(&app, "/platforms", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let v: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    let errors = v["errors"].as_array().cloned().unwrap_or_default();
    assert!(errors.contains(&json!("The name field is required.")), "{body}");
    assert!(
        errors.contains(&json!("The platform_logo.url field is required.")),
        "{body}"
    );
}

#[tokio::test]
async fn create_platform_rejects_duplicate_slug() {
    let (app, _state) = common::test_app().await;

    let (status, _) = common::post_json(&app, "/platforms", &platform_body("Neo Geo")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = common::post_json(&app, "/platforms", &platform_body("Neo Geo")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(
        v["errors"],
        json!(["A platform with this slug already exists."])
    );
}

#[tokio::test]
async fn create_platform_from_form_redirects_to_resource() {
    let (app, _state) = common::test_app().await;

    let (status, headers, body) = common::post_form(
        &app,
        "/platforms",
        "name=Mega+Drive&platform_logo_url=https%3A%2F%2Fimages.example%2Fmd.png\
         &platform_logo_width=200&platform_logo_height=80",
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER, "{body}");
    let location = headers
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/platforms/mega-drive");

    let (status, _) = common::get_json(&app, "/platforms/mega-drive").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_platform_rejects_unknown_content_type_with_empty_body() {
    let (app, _state) = common::test_app().await;

    let (status, _, body) = common::send(
        &app,
        "POST",
        "/platforms",
        &[("content-type", "text/plain")],
        Some(b"Super Nintendo".to_vec()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty(), "expected empty body, got: {body}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Read
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_platform_returns_json_error_body() {
    let (app, _state) = common::test_app().await;

    let (status, body) = common::get_json(&app, "/platforms/unknown-slug").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(v, json!({ "error": "This platform does not exist." }));
}

#[tokio::test]
async fn unknown_platform_renders_not_found_page() {
    let (app, _state) = common::test_app().await;

    let (status, body) = common::get(&app, "/platforms/unknown-slug").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"), "{body}");
}

#[tokio::test]
async fn index_lists_all_platforms_as_json() {
    let (app, _state) = common::test_app().await;

    for name in ["Dreamcast", "Game Boy"] {
        let (status, _) = common::post_json(&app, "/platforms", &platform_body(name)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = common::get_json(&app, "/platforms").await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    let names: Vec<&str> = v
        .as_array()
        .map(|items| items.iter().filter_map(|p| p["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["Dreamcast", "Game Boy"]);
}

#[tokio::test]
async fn index_renders_html_without_accept_header() {
    let (app, _state) = common::test_app().await;

    let (status, body) = common::get(&app, "/platforms").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<html"), "{body}");
    assert!(body.contains("Platforms"), "{body}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Update
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn json_update_merges_fields_and_keeps_slug() {
    let (app, _state) = common::test_app().await;

    let (status, _) = common::post_json(&app, "/platforms", &platform_body("Super Nintendo")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = common::put_json(
        &app,
        "/platforms/super-nintendo",
        &json!({ "name": "Super NES" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let v: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(v["name"], "Super NES");
    assert_eq!(v["slug"], "super-nintendo");
    // untouched fields survive the merge
    assert_eq!(v["platform_logo"]["url"], "https://images.example/snes.png");
}

#[tokio::test]
async fn json_update_of_missing_platform_is_404_with_empty_body() {
    let (app, _state) = common::test_app().await;

    let (status, body) = common::put_json(
        &app,
        "/platforms/unknown-slug",
        &json!({ "name": "Whatever" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty(), "expected empty body, got: {body}");
}

#[tokio::test]
async fn form_update_rederives_the_slug() {
    let (app, _state) = common::test_app().await;

    let (status, _) = common::post_json(&app, "/platforms", &platform_body("Super Nintendo")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, headers, body) = common::post_form(
        &app,
        "/platforms/super-nintendo",
        "name=Super+Famicom&platform_logo_url=https%3A%2F%2Fimages.example%2Fsfc.png\
         &platform_logo_width=250&platform_logo_height=90",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER, "{body}");
    let location = headers
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/platforms/super-famicom");

    let (status, _) = common::get_json(&app, "/platforms/super-nintendo").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = common::get_json(&app, "/platforms/super-famicom").await;
    assert_eq!(status, StatusCode::OK);
}

// ─────────────────────────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_twice_returns_204_then_404() {
    let (app, _state) = common::test_app().await;

    let (status, _) = common::post_json(&app, "/platforms", &platform_body("Virtual Boy")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = common::delete(&app, "/platforms/virtual-boy").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = common::delete(&app, "/platforms/virtual-boy").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}
