mod common;

use anyhow::Result;
use axum::http::StatusCode;
use bson::oid::ObjectId;
use serde_json::json;

#[tokio::test]
async fn unknown_route_returns_fixed_404() -> Result<()> {
    let app = common::test_app().await;

    let (status, body) = common::send(app, common::empty_request("GET", "/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "This route does not exist");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let app = common::test_app().await;

    let (status, body) = common::send(app, common::empty_request("GET", "/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Restaurants API");
    Ok(())
}

#[tokio::test]
async fn restaurant_get_with_malformed_id_is_404() -> Result<()> {
    let app = common::test_app().await;

    let (status, body) =
        common::send(app, common::empty_request("GET", "/api/restaurants/not-an-id")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Restaurant not found.");
    Ok(())
}

#[tokio::test]
async fn restaurant_list_rejects_unknown_enum_value() -> Result<()> {
    let app = common::test_app().await;

    let (status, _body) = common::send(
        app,
        common::empty_request("GET", "/api/restaurants?neighborhood=Bronx"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn restaurant_create_requires_token() -> Result<()> {
    let app = common::test_app().await;

    let request = common::json_request("POST", "/api/restaurants", json!({ "restaurants": [] }));
    let (status, _body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn restaurant_create_rejects_non_array_payload() -> Result<()> {
    let app = common::test_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/restaurants")
        .header("authorization", common::bearer_for(&ObjectId::new()))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            json!({ "restaurants": "not an array" }).to_string(),
        ))?;
    let (status, body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Input should be an array of restaurants.");
    Ok(())
}

#[tokio::test]
async fn restaurant_update_with_malformed_id_is_404() -> Result<()> {
    let app = common::test_app().await;

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/api/restaurants/not-an-id")
        .header("authorization", common::bearer_for(&ObjectId::new()))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(json!({ "name": "x" }).to_string()))?;
    let (status, body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Restaurant not found.");
    Ok(())
}

#[tokio::test]
async fn restaurant_delete_requires_token() -> Result<()> {
    let app = common::test_app().await;

    let uri = format!("/api/restaurants/{}", ObjectId::new().to_hex());
    let (status, _body) = common::send(app, common::empty_request("DELETE", &uri)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn user_self_requires_token() -> Result<()> {
    let app = common::test_app().await;

    let (status, _body) = common::send(app, common::empty_request("GET", "/user")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn favorites_add_rejects_malformed_ids() -> Result<()> {
    let app = common::test_app().await;

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/user/restaurants")
        .header("authorization", common::bearer_for(&ObjectId::new()))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(json!(["not-an-id"]).to_string()))?;
    let (status, body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Input should be an array of restaurant ids.");
    Ok(())
}

#[tokio::test]
async fn favorites_remove_rejects_malformed_id() -> Result<()> {
    let app = common::test_app().await;

    let request = axum::http::Request::builder()
        .method("DELETE")
        .uri("/user/restaurants/not-an-id")
        .header("authorization", common::bearer_for(&ObjectId::new()))
        .body(axum::body::Body::empty())?;
    let (status, body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid restaurant id.");
    Ok(())
}
