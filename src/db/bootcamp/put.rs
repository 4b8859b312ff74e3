use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{bootcamp::get_bootcamp, get_conn},
    errors::AppError,
    geocoder::Geocoder,
    models::{Bootcamp, Location, UpdateBootcamp, bootcamp::slugify, redis::RedisKey},
    state::RedisClient,
};

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SlugSwap {
    pub old: String,
    pub new: String,
}

pub async fn update_bootcamp(
    id: Uuid,
    payload: UpdateBootcamp,
    geocoder: &Geocoder,
    redis: RedisClient,
) -> Result<Bootcamp, AppError> {
    payload.validate().map_err(AppError::Validation)?;

    let bootcamp = get_bootcamp(id, redis.clone()).await?;

    // All fallible work (geocode, serialization) happens before any key is
    // touched, so a failure here leaves the slug index untouched.
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
    let geo_changed = location.is_some();

    let (bootcamp, slug_swap) = apply_update(bootcamp, payload, location);

    let json =
        serde_json::to_string(&bootcamp).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut conn = get_conn(&redis).await?;

    // Same uniqueness gate as on create.
    if let Some(swap) = &slug_swap {
        let claimed: bool = conn
            .set_nx(RedisKey::bootcamp_slug(&swap.new), id.to_string())
            .await
            .map_err(AppError::RedisCommandError)?;

        if !claimed {
            return Err(AppError::Conflict { field: "slug" });
        }
    }

    // The old slug key is released in the same pipeline that writes the
    // updated record, so the index never disagrees with the stored slug.
    let mut pipe = redis::pipe();
    pipe.cmd("SET").arg(RedisKey::bootcamp(id)).arg(json).ignore();

    if let Some(swap) = &slug_swap {
        pipe.cmd("DEL")
            .arg(RedisKey::bootcamp_slug(&swap.old))
            .ignore();
    }

    if geo_changed {
        if let Some(location) = &bootcamp.location {
            pipe.cmd("GEOADD")
                .arg(RedisKey::bootcamps_geo())
                .arg(location.coordinates[0])
                .arg(location.coordinates[1])
                .arg(id.to_string())
                .ignore();
        }
    }

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(bootcamp)
}

/// Applies the changed fields to the record. A name change re-derives the
/// slug and reports the swap; everything else is a plain overwrite.
pub(crate) fn apply_update(
    mut bootcamp: Bootcamp,
    payload: UpdateBootcamp,
    location: Option<Location>,
) -> (Bootcamp, Option<SlugSwap>) {
    let mut slug_swap = None;

    if let Some(name) = payload.name {
        let new_slug = slugify(&name);
        if new_slug != bootcamp.slug {
            slug_swap = Some(SlugSwap {
                old: bootcamp.slug.clone(),
                new: new_slug.clone(),
            });
            bootcamp.slug = new_slug;
        }
        bootcamp.name = name;
    }

    if let Some(description) = payload.description {
        bootcamp.description = description;
    }
    if let Some(website) = payload.website {
        bootcamp.website = Some(website);
    }
    if let Some(phone) = payload.phone {
        bootcamp.phone = Some(phone);
    }
    if let Some(email) = payload.email {
        bootcamp.email = Some(email);
    }
    if let Some(careers) = payload.careers {
        bootcamp.careers = careers;
    }
    if let Some(average_cost) = payload.average_cost {
        bootcamp.average_cost = Some(average_cost);
    }
    if let Some(housing) = payload.housing {
        bootcamp.housing = housing;
    }
    if let Some(job_assistance) = payload.job_assistance {
        bootcamp.job_assistance = job_assistance;
    }
    if let Some(job_guarantee) = payload.job_guarantee {
        bootcamp.job_guarantee = job_guarantee;
    }
    if let Some(accept_gi) = payload.accept_gi {
        bootcamp.accept_gi = accept_gi;
    }

    if let Some(location) = location {
        bootcamp.location = Some(location);
    }

    (bootcamp, slug_swap)
}
