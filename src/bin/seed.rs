//! One-shot seeder: `seed -i` imports the fixture data, `seed -d` wipes it.

use bb8::Pool;
use bb8_redis::RedisConnectionManager;

use campdir_be::{
    errors::AppError,
    models::{Bootcamp, Course, redis::RedisKey},
    state::RedisClient,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let flag = std::env::args().nth(1);

    let result = match flag.as_deref() {
        Some("-i") => import_data().await,
        Some("-d") => delete_data().await,
        _ => {
            eprintln!("Usage: seed -i (import) | -d (delete)");
            std::process::exit(1);
        }
    };

    // Any failure must surface as a nonzero exit status.
    if let Err(e) = result {
        tracing::error!("Seeder failed: {}", e);
        std::process::exit(1);
    }
}

async fn connect() -> Result<RedisClient, AppError> {
    let redis_url = std::env::var("REDIS_URL")
        .map_err(|_| AppError::RedisPoolError("REDIS_URL must be set".into()))?;
    let manager =
        RedisConnectionManager::new(redis_url).map_err(AppError::RedisCommandError)?;
    Pool::builder()
        .build(manager)
        .await
        .map_err(AppError::RedisCommandError)
}

async fn import_data() -> Result<(), AppError> {
    let bootcamps: Vec<Bootcamp> =
        serde_json::from_str(&std::fs::read_to_string("data/bootcamps.json")?)
            .map_err(|e| AppError::Deserialization(format!("bootcamps.json: {e}")))?;
    let courses: Vec<Course> =
        serde_json::from_str(&std::fs::read_to_string("data/courses.json")?)
            .map_err(|e| AppError::Deserialization(format!("courses.json: {e}")))?;

    let redis = connect().await?;
    let mut conn = redis
        .get()
        .await
        .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

    let mut pipe = redis::pipe();

    for bootcamp in &bootcamps {
        let json = serde_json::to_string(bootcamp)
            .map_err(|e| AppError::Serialization(e.to_string()))?;

        pipe.cmd("SET")
            .arg(RedisKey::bootcamp(bootcamp.id))
            .arg(json)
            .ignore()
            .cmd("SADD")
            .arg(RedisKey::bootcamps())
            .arg(bootcamp.id.to_string())
            .ignore()
            .cmd("SET")
            .arg(RedisKey::bootcamp_slug(&bootcamp.slug))
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
    }

    for course in &courses {
        let json =
            serde_json::to_string(course).map_err(|e| AppError::Serialization(e.to_string()))?;

        pipe.cmd("SET")
            .arg(RedisKey::course(course.id))
            .arg(json)
            .ignore()
            .cmd("SADD")
            .arg(RedisKey::courses())
            .arg(course.id.to_string())
            .ignore()
            .cmd("SADD")
            .arg(RedisKey::bootcamp_courses(course.bootcamp))
            .arg(course.id.to_string())
            .ignore();
    }

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!(
        "Data imported: {} bootcamps, {} courses",
        bootcamps.len(),
        courses.len()
    );
    Ok(())
}

async fn delete_data() -> Result<(), AppError> {
    let redis = connect().await?;
    let mut conn = redis
        .get()
        .await
        .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

    let mut keys: Vec<String> = vec![
        RedisKey::bootcamps(),
        RedisKey::courses(),
        RedisKey::bootcamps_geo(),
    ];

    for pattern in ["bootcamp:*", "bootcamp_slug:*", "course:*"] {
        let found: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;
        keys.extend(found);
    }

    let count = keys.len();
    let mut pipe = redis::pipe();
    for key in keys {
        pipe.cmd("DEL").arg(key).ignore();
    }

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!("Data destroyed: {} keys removed", count);
    Ok(())
}
