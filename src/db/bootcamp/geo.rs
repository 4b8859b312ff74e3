use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::get_conn,
    errors::AppError,
    models::{Bootcamp, redis::RedisKey},
    state::RedisClient,
};

/// Spherical containment query. GEOSEARCH takes the distance in miles and
/// does the radius math itself.
pub async fn get_bootcamps_in_radius(
    lng: f64,
    lat: f64,
    distance_miles: f64,
    redis: RedisClient,
) -> Result<Vec<Bootcamp>, AppError> {
    let mut conn = get_conn(&redis).await?;

    let ids: Vec<String> = redis::cmd("GEOSEARCH")
        .arg(RedisKey::bootcamps_geo())
        .arg("FROMLONLAT")
        .arg(lng)
        .arg(lat)
        .arg("BYRADIUS")
        .arg(distance_miles)
        .arg("mi")
        .arg("ASC")
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut bootcamps = Vec::with_capacity(ids.len());

    for id_str in ids {
        let Ok(id) = Uuid::parse_str(&id_str) else {
            continue;
        };

        let json: Option<String> = conn
            .get(RedisKey::bootcamp(id))
            .await
            .map_err(AppError::RedisCommandError)?;

        if let Some(json) = json {
            let bootcamp: Bootcamp = serde_json::from_str(&json)
                .map_err(|_| AppError::Deserialization("Invalid bootcamp record".into()))?;
            bootcamps.push(bootcamp);
        }
    }

    Ok(bootcamps)
}
