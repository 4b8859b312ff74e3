use uuid::Uuid;

use crate::{
    db::{course::get_course, get_conn},
    errors::AppError,
    models::redis::RedisKey,
    state::RedisClient,
};

pub async fn delete_course(id: Uuid, redis: RedisClient) -> Result<(), AppError> {
    let course = get_course(id, redis.clone()).await?;
    let mut conn = get_conn(&redis).await?;

    let _: () = redis::pipe()
        .cmd("DEL")
        .arg(RedisKey::course(id))
        .ignore()
        .cmd("SREM")
        .arg(RedisKey::courses())
        .arg(id.to_string())
        .ignore()
        .cmd("SREM")
        .arg(RedisKey::bootcamp_courses(course.bootcamp))
        .arg(id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
