use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use serde_json::Value;
use tower::ServiceExt;

use campdir_be::{
    config::Config, geocoder::Geocoder, http::create_http_routes, state::AppState,
};

// Pool built lazily against a port nobody listens on; the requests below all
// fail before a connection is ever checked out.
fn test_router() -> Router {
    let manager =
        RedisConnectionManager::new("redis://127.0.0.1:1/").expect("valid redis url");
    let redis = Pool::builder().build_unchecked(manager);

    let config = Arc::new(Config {
        port: 0,
        redis_url: "redis://127.0.0.1:1/".to_string(),
        geocoder_url: "http://127.0.0.1:1/".to_string(),
        max_photo_upload: 1_000_000,
        max_video_upload: 50_000_000,
        photo_upload_path: "./public/uploads".to_string(),
        video_upload_path: "./public/uploads".to_string(),
    });

    create_http_routes(AppState {
        redis,
        config,
        geocoder: Geocoder::new("http://127.0.0.1:1/".to_string()),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn malformed_id_gets_the_not_found_envelope() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/bootcamps/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Resource not found");
}

#[tokio::test]
async fn empty_create_payload_reports_every_missing_field() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/bootcamps")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("Please add a name"));
    assert!(error.contains("Please add a description"));
    assert!(error.contains("Please add at least one career"));
}

#[tokio::test]
async fn negative_radius_distance_is_a_client_error() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/bootcamps/radius/02215/-5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Distance must be a non-negative number of miles");
}

#[tokio::test]
async fn nan_radius_distance_is_a_client_error() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/bootcamps/radius/02215/NaN")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn invalid_update_payload_is_rejected_before_any_lookup() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/bootcamps/5f3e6c9a-0001-4000-8000-000000000001")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"careers": []}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Please add at least one career");
}
