use redis::AsyncCommands;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::{bootcamp::get_bootcamp, get_conn},
    errors::AppError,
    models::{Course, redis::RedisKey},
    state::RedisClient,
};

pub async fn get_course(id: Uuid, redis: RedisClient) -> Result<Course, AppError> {
    let mut conn = get_conn(&redis).await?;

    let json: Option<String> = conn
        .get(RedisKey::course(id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let json = json.ok_or_else(|| AppError::not_found("Course", id))?;

    serde_json::from_str(&json)
        .map_err(|_| AppError::Deserialization("Invalid course record".into()))
}

/// Every course as a raw document, for the listing pipeline.
pub async fn get_all_courses(redis: RedisClient) -> Result<Vec<Value>, AppError> {
    let mut conn = get_conn(&redis).await?;

    let ids: Vec<String> = conn
        .smembers(RedisKey::courses())
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut courses = Vec::with_capacity(ids.len());

    for id_str in ids {
        let Ok(id) = Uuid::parse_str(&id_str) else {
            tracing::warn!("Skipping malformed course index entry: {}", id_str);
            continue;
        };

        let json: Option<String> = conn
            .get(RedisKey::course(id))
            .await
            .map_err(AppError::RedisCommandError)?;

        if let Some(json) = json {
            let doc: Value = serde_json::from_str(&json)
                .map_err(|_| AppError::Deserialization("Invalid course record".into()))?;
            courses.push(doc);
        }
    }

    Ok(courses)
}

/// Courses of one bootcamp; 404s when the bootcamp itself is missing.
pub async fn get_courses_for_bootcamp(
    bootcamp_id: Uuid,
    redis: RedisClient,
) -> Result<Vec<Course>, AppError> {
    get_bootcamp(bootcamp_id, redis.clone()).await?;

    let mut conn = get_conn(&redis).await?;

    let course_ids: Vec<String> = conn
        .smembers(RedisKey::bootcamp_courses(bootcamp_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut courses = Vec::with_capacity(course_ids.len());

    for id_str in course_ids {
        let Ok(id) = Uuid::parse_str(&id_str) else {
            continue;
        };

        let json: Option<String> = conn
            .get(RedisKey::course(id))
            .await
            .map_err(AppError::RedisCommandError)?;

        if let Some(json) = json {
            let course: Course = serde_json::from_str(&json)
                .map_err(|_| AppError::Deserialization("Invalid course record".into()))?;
            courses.push(course);
        }
    }

    Ok(courses)
}
