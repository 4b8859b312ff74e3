use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{bootcamp::get_bootcamp, get_conn},
    errors::AppError,
    models::{Course, CreateCourse, MinimumSkill, redis::RedisKey},
    state::RedisClient,
};

pub async fn create_course(
    bootcamp_id: Uuid,
    payload: CreateCourse,
    redis: RedisClient,
) -> Result<Course, AppError> {
    // The owning bootcamp must exist before anything is written.
    get_bootcamp(bootcamp_id, redis.clone()).await?;

    payload.validate().map_err(AppError::Validation)?;

    // Required fields are present once validation passed.
    let course = Course {
        id: Uuid::new_v4(),
        title: payload.title.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        weeks: payload.weeks.unwrap_or_default(),
        tuition: payload.tuition.unwrap_or_default(),
        minimum_skill: payload.minimum_skill.unwrap_or(MinimumSkill::Beginner),
        scholarship_available: payload.scholarship_available,
        created_at: Utc::now(),
        bootcamp: bootcamp_id,
        user: payload.user,
    };

    let json =
        serde_json::to_string(&course).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut conn = get_conn(&redis).await?;

    let _: () = redis::pipe()
        .cmd("SET")
        .arg(RedisKey::course(course.id))
        .arg(json)
        .ignore()
        .cmd("SADD")
        .arg(RedisKey::courses())
        .arg(course.id.to_string())
        .ignore()
        .cmd("SADD")
        .arg(RedisKey::bootcamp_courses(bootcamp_id))
        .arg(course.id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(course)
}
