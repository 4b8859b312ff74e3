use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{course::get_course, get_conn},
    errors::AppError,
    models::{Course, UpdateCourse, redis::RedisKey},
    state::RedisClient,
};

pub async fn update_course(
    id: Uuid,
    payload: UpdateCourse,
    redis: RedisClient,
) -> Result<Course, AppError> {
    payload.validate().map_err(AppError::Validation)?;

    let mut course = get_course(id, redis.clone()).await?;

    if let Some(title) = payload.title {
        course.title = title;
    }
    if let Some(description) = payload.description {
        course.description = description;
    }
    if let Some(weeks) = payload.weeks {
        course.weeks = weeks;
    }
    if let Some(tuition) = payload.tuition {
        course.tuition = tuition;
    }
    if let Some(minimum_skill) = payload.minimum_skill {
        course.minimum_skill = minimum_skill;
    }
    if let Some(scholarship_available) = payload.scholarship_available {
        course.scholarship_available = scholarship_available;
    }

    let json =
        serde_json::to_string(&course).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut conn = get_conn(&redis).await?;
    let _: () = conn
        .set(RedisKey::course(id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(course)
}
