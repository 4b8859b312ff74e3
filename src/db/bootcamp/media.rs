use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{bootcamp::get_bootcamp, get_conn},
    errors::AppError,
    models::{bootcamp::MediaKind, redis::RedisKey},
    state::RedisClient,
};

/// Points the record's media filename at an already-written upload.
pub async fn set_bootcamp_media(
    id: Uuid,
    kind: MediaKind,
    filename: String,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut bootcamp = get_bootcamp(id, redis.clone()).await?;

    match kind {
        MediaKind::Photo => bootcamp.photo = filename,
        MediaKind::Video => bootcamp.video = Some(filename),
    }

    let json =
        serde_json::to_string(&bootcamp).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut conn = get_conn(&redis).await?;
    let _: () = conn
        .set(RedisKey::bootcamp(id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
