pub mod config;
pub mod db;
pub mod errors;
pub mod geocoder;
pub mod http;
mod middleware;
pub mod models;
pub mod query;
pub mod state;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, middleware as axum_middleware};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use tower_http::{services::ServeDir, trace::TraceLayer};

use config::Config;
use geocoder::Geocoder;
use middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware};
use state::AppState;

/// Static file service for stored media. Photos and videos may live in
/// separate directories; a miss in the photo directory falls through to the
/// video one.
pub fn uploads_service(photo_dir: &str, video_dir: &str) -> ServeDir<ServeDir> {
    ServeDir::new(photo_dir).fallback(ServeDir::new(video_dir))
}

pub async fn start_server() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Arc::new(Config::from_env());

    let manager = RedisConnectionManager::new(config.redis_url.clone()).unwrap();
    let redis_pool = Pool::builder().build(manager).await.unwrap();

    let geocoder = Geocoder::new(config.geocoder_url.clone());

    let state = AppState {
        redis: redis_pool,
        config: config.clone(),
        geocoder,
    };

    let global_rate_limiter = create_global_rate_limiter();

    let app = Router::new()
        .merge(http::create_http_routes(state))
        .nest_service(
            "/uploads",
            uploads_service(&config.photo_upload_path, &config.video_upload_path),
        )
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer())
        .fallback(|| async { "404 Not Found" });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind address");

    tracing::info!("Bootcamp directory API running on port {}", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
