use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    db::bootcamp::{
        create_bootcamp, delete_bootcamp, get_all_bootcamps, get_bootcamp,
        get_bootcamps_in_radius, update_bootcamp,
    },
    errors::AppError,
    http::handlers::parse_id,
    models::{Bootcamp, CountResponse, CreateBootcamp, DataResponse, UpdateBootcamp},
    query::{self, Listing},
    state::AppState,
};

pub async fn get_bootcamps_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Listing>, AppError> {
    let list_query = query::parse(&params);
    let bootcamps = get_all_bootcamps(state.redis.clone()).await?;
    let listing = query::run(&list_query, bootcamps);

    tracing::info!("Retrieved {} bootcamps", listing.count);
    Ok(Json(listing))
}

pub async fn get_bootcamp_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Bootcamp>>, AppError> {
    let id = parse_id(&id)?;
    let bootcamp = get_bootcamp(id, state.redis.clone()).await?;

    tracing::info!("Retrieved bootcamp {}", id);
    Ok(Json(DataResponse::new(bootcamp)))
}

pub async fn create_bootcamp_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateBootcamp>,
) -> Result<(StatusCode, Json<DataResponse<Bootcamp>>), AppError> {
    let bootcamp = create_bootcamp(payload, &state.geocoder, state.redis.clone()).await?;

    tracing::info!("Created bootcamp {} ({})", bootcamp.id, bootcamp.slug);
    Ok((StatusCode::CREATED, Json(DataResponse::new(bootcamp))))
}

pub async fn update_bootcamp_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateBootcamp>,
) -> Result<Json<DataResponse<Bootcamp>>, AppError> {
    let id = parse_id(&id)?;
    let bootcamp = update_bootcamp(id, payload, &state.geocoder, state.redis.clone()).await?;

    tracing::info!("Updated bootcamp {}", id);
    Ok(Json(DataResponse::new(bootcamp)))
}

pub async fn delete_bootcamp_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Value>>, AppError> {
    let id = parse_id(&id)?;
    delete_bootcamp(id, state.redis.clone()).await?;

    Ok(Json(DataResponse::new(json!({}))))
}

pub async fn get_bootcamps_in_radius_handler(
    Path((zipcode, distance)): Path<(String, f64)>,
    State(state): State<AppState>,
) -> Result<Json<CountResponse<Bootcamp>>, AppError> {
    // GEOSEARCH rejects negative and non-finite radii with a server error;
    // vet the path segment here so the caller gets a 400 instead.
    if !distance.is_finite() || distance < 0.0 {
        return Err(AppError::Validation(vec![
            "Distance must be a non-negative number of miles".to_string(),
        ]));
    }

    let point = state.geocoder.geocode(&zipcode).await?;
    let bootcamps =
        get_bootcamps_in_radius(point.lng, point.lat, distance, state.redis.clone()).await?;

    tracing::info!(
        "Radius search around {} ({} mi) matched {} bootcamps",
        zipcode,
        distance,
        bootcamps.len()
    );
    Ok(Json(CountResponse::new(bootcamps)))
}
