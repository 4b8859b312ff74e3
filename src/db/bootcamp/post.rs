use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::get_conn,
    errors::AppError,
    geocoder::Geocoder,
    models::{Bootcamp, CreateBootcamp, Location, bootcamp::slugify, redis::RedisKey},
    state::RedisClient,
};

pub async fn create_bootcamp(
    payload: CreateBootcamp,
    geocoder: &Geocoder,
    redis: RedisClient,
) -> Result<Bootcamp, AppError> {
    payload.validate().map_err(AppError::Validation)?;

    let id = Uuid::new_v4();

    // Geocode before anything is written, so a failed lookup persists nothing.
    let location = match &payload.address {
        Some(address) => {
            let point = geocoder.geocode(address).await?;
            Some(Location {
                coordinates: [point.lng, point.lat],
                formatted_address: point.formatted_address,
                city: point.city,
                zipcode: point.zipcode,
                country: point.country,
            })
        }
        None => None,
    };

    // Required fields are present once validation passed.
    let name = payload.name.unwrap_or_default();
    let slug = slugify(&name);

    let bootcamp = Bootcamp {
        id,
        name,
        slug: slug.clone(),
        description: payload.description.unwrap_or_default(),
        website: payload.website,
        phone: payload.phone,
        email: payload.email,
        location: location.clone(),
        careers: payload.careers.unwrap_or_default(),
        average_rating: None,
        average_cost: payload.average_cost,
        photo: "no-photo.jpg".to_string(),
        video: None,
        housing: payload.housing,
        job_assistance: payload.job_assistance,
        job_guarantee: payload.job_guarantee,
        accept_gi: payload.accept_gi,
        created_at: Utc::now(),
        user: payload.user,
    };

    let mut conn = get_conn(&redis).await?;

    // SET NX on the slug key is the uniqueness gate; nothing else is written
    // when it loses.
    let claimed: bool = conn
        .set_nx(RedisKey::bootcamp_slug(&slug), id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    if !claimed {
        return Err(AppError::Conflict { field: "slug" });
    }

    let pipe = insert_bootcamp_pipe(&bootcamp)?;

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(bootcamp)
}

/// Builds the write plan for a new record: the JSON document, the id index
/// entry, and the geo entry when a location exists. The slug key is claimed
/// separately beforehand and never appears here.
pub(crate) fn insert_bootcamp_pipe(bootcamp: &Bootcamp) -> Result<redis::Pipeline, AppError> {
    let json =
        serde_json::to_string(bootcamp).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut pipe = redis::pipe();
    pipe.cmd("SET")
        .arg(RedisKey::bootcamp(bootcamp.id))
        .arg(json)
        .ignore()
        .cmd("SADD")
        .arg(RedisKey::bootcamps())
        .arg(bootcamp.id.to_string())
        .ignore();

    if let Some(location) = &bootcamp.location {
        pipe.cmd("GEOADD")
            .arg(RedisKey::bootcamps_geo())
            .arg(location.coordinates[0])
            .arg(location.coordinates[1])
            .arg(bootcamp.id.to_string())
            .ignore();
    }

    Ok(pipe)
}
