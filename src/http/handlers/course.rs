use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    db::course::{
        create_course, delete_course, get_all_courses, get_course, get_courses_for_bootcamp,
        update_course,
    },
    errors::AppError,
    http::handlers::parse_id,
    models::{CountResponse, Course, CreateCourse, DataResponse, UpdateCourse},
    query::{self, Listing},
    state::AppState,
};

pub async fn get_courses_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Listing>, AppError> {
    let list_query = query::parse(&params);
    let courses = get_all_courses(state.redis.clone()).await?;
    let listing = query::run(&list_query, courses);

    tracing::info!("Retrieved {} courses", listing.count);
    Ok(Json(listing))
}

pub async fn get_bootcamp_courses_handler(
    Path(bootcamp_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CountResponse<Course>>, AppError> {
    let bootcamp_id = parse_id(&bootcamp_id)?;
    let courses = get_courses_for_bootcamp(bootcamp_id, state.redis.clone()).await?;

    tracing::info!(
        "Retrieved {} courses for bootcamp {}",
        courses.len(),
        bootcamp_id
    );
    Ok(Json(CountResponse::new(courses)))
}

pub async fn get_course_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Course>>, AppError> {
    let id = parse_id(&id)?;
    let course = get_course(id, state.redis.clone()).await?;

    tracing::info!("Retrieved course {}", id);
    Ok(Json(DataResponse::new(course)))
}

pub async fn create_course_handler(
    Path(bootcamp_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<CreateCourse>,
) -> Result<(StatusCode, Json<DataResponse<Course>>), AppError> {
    let bootcamp_id = parse_id(&bootcamp_id)?;
    let course = create_course(bootcamp_id, payload, state.redis.clone()).await?;

    tracing::info!("Created course {} under bootcamp {}", course.id, bootcamp_id);
    Ok((StatusCode::CREATED, Json(DataResponse::new(course))))
}

pub async fn update_course_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCourse>,
) -> Result<Json<DataResponse<Course>>, AppError> {
    let id = parse_id(&id)?;
    let course = update_course(id, payload, state.redis.clone()).await?;

    tracing::info!("Updated course {}", id);
    Ok(Json(DataResponse::new(course)))
}

pub async fn delete_course_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Value>>, AppError> {
    let id = parse_id(&id)?;
    delete_course(id, state.redis.clone()).await?;

    tracing::info!("Deleted course {}", id);
    Ok(Json(DataResponse::new(json!({}))))
}
