use redis::AsyncCommands;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::get_conn,
    errors::AppError,
    models::{Bootcamp, redis::RedisKey},
    state::RedisClient,
};

pub async fn get_bootcamp(id: Uuid, redis: RedisClient) -> Result<Bootcamp, AppError> {
    let mut conn = get_conn(&redis).await?;

    let json: Option<String> = conn
        .get(RedisKey::bootcamp(id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let json = json.ok_or_else(|| AppError::not_found("Bootcamp", id))?;

    serde_json::from_str(&json)
        .map_err(|_| AppError::Deserialization("Invalid bootcamp record".into()))
}

/// Fetches every bootcamp as a raw document with its courses attached, ready
/// for the listing pipeline.
pub async fn get_all_bootcamps(redis: RedisClient) -> Result<Vec<Value>, AppError> {
    let mut conn = get_conn(&redis).await?;

    let ids: Vec<String> = conn
        .smembers(RedisKey::bootcamps())
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut bootcamps = Vec::with_capacity(ids.len());

    for id_str in ids {
        let Ok(id) = Uuid::parse_str(&id_str) else {
            tracing::warn!("Skipping malformed bootcamp index entry: {}", id_str);
            continue;
        };

        let json: Option<String> = conn
            .get(RedisKey::bootcamp(id))
            .await
            .map_err(AppError::RedisCommandError)?;

        // Index entry without a record means a torn delete, skip it.
        let Some(json) = json else {
            tracing::warn!("Bootcamp {} is indexed but has no record", id);
            continue;
        };

        let mut doc: Value = serde_json::from_str(&json)
            .map_err(|_| AppError::Deserialization("Invalid bootcamp record".into()))?;

        let courses = get_courses_for(id, &mut conn).await?;
        doc["courses"] = Value::Array(courses);

        bootcamps.push(doc);
    }

    Ok(bootcamps)
}

async fn get_courses_for(
    bootcamp_id: Uuid,
    conn: &mut redis::aio::MultiplexedConnection,
) -> Result<Vec<Value>, AppError> {
    let course_ids: Vec<String> = conn
        .smembers(RedisKey::bootcamp_courses(bootcamp_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut courses = Vec::with_capacity(course_ids.len());
    for course_id in course_ids {
        let Ok(course_id) = Uuid::parse_str(&course_id) else {
            continue;
        };
        let json: Option<String> = conn
            .get(RedisKey::course(course_id))
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
