use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{bootcamp::get_bootcamp, get_conn},
    errors::AppError,
    models::redis::RedisKey,
    state::RedisClient,
};

/// Deletes a bootcamp and cascades to its courses: every course record, both
/// course index entries, the slug key, and the geo entry go in one pipeline.
pub async fn delete_bootcamp(id: Uuid, redis: RedisClient) -> Result<(), AppError> {
    let bootcamp = get_bootcamp(id, redis.clone()).await?;
    let mut conn = get_conn(&redis).await?;

    let course_ids: Vec<String> = conn
        .smembers(RedisKey::bootcamp_courses(id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let pipe = cascade_delete_pipe(id, &bootcamp.slug, &course_ids);

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!(
        "Deleted bootcamp {} and {} dependent courses",
        id,
        course_ids.len()
    );

    Ok(())
}

/// Builds the cascade plan: course records and their index entries first,
/// then the bootcamp's course set, slug key, geo entry, index entry, and
/// finally the record itself.
pub(crate) fn cascade_delete_pipe(id: Uuid, slug: &str, course_ids: &[String]) -> redis::Pipeline {
    let mut pipe = redis::pipe();

    for course_id in course_ids {
        if let Ok(course_id) = Uuid::parse_str(course_id) {
            pipe.cmd("DEL").arg(RedisKey::course(course_id)).ignore();
        }
        pipe.cmd("SREM")
            .arg(RedisKey::courses())
            .arg(course_id)
            .ignore();
    }

    pipe.cmd("DEL")
        .arg(RedisKey::bootcamp_courses(id))
        .ignore()
        .cmd("DEL")
        .arg(RedisKey::bootcamp_slug(slug))
        .ignore()
        .cmd("ZREM")
        .arg(RedisKey::bootcamps_geo())
        .arg(id.to_string())
        .ignore()
        .cmd("SREM")
        .arg(RedisKey::bootcamps())
        .arg(id.to_string())
        .ignore()
        .cmd("DEL")
        .arg(RedisKey::bootcamp(id))
        .ignore();

    pipe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::pipe_commands;

    #[test]
    fn cascade_plan_leaves_no_orphan_keys() {
        let id = Uuid::parse_str("5f3e6c9a-0001-4000-8000-000000000001").unwrap();
        let course_a = "6a1f0d2b-0001-4000-8000-000000000001".to_string();
        let course_b = "6a1f0d2b-0002-4000-8000-000000000002".to_string();

        let commands = pipe_commands(&cascade_delete_pipe(
            id,
            "devworks-bootcamp",
            &[course_a.clone(), course_b.clone()],
        ));

        // Every course record is deleted and removed from the global index.
        for course_id in [&course_a, &course_b] {
            let key = RedisKey::course(Uuid::parse_str(course_id).unwrap());
            assert!(
                commands
                    .iter()
                    .any(|c| c[0] == "DEL" && c[1] == key)
            );
            assert!(
                commands
                    .iter()
                    .any(|c| c[0] == "SREM" && c[1] == RedisKey::courses() && c[2] == *course_id)
            );
        }

        // The bootcamp's own keys all go: course set, slug, geo, index, record.
        for key in [
            RedisKey::bootcamp_courses(id),
            RedisKey::bootcamp_slug("devworks-bootcamp"),
            RedisKey::bootcamp(id),
        ] {
            assert!(commands.iter().any(|c| c[0] == "DEL" && c[1] == key));
        }
        assert!(
            commands
                .iter()
                .any(|c| c[0] == "ZREM" && c[1] == RedisKey::bootcamps_geo())
        );
        assert!(
            commands
                .iter()
                .any(|c| c[0] == "SREM" && c[1] == RedisKey::bootcamps())
        );

        // 2 commands per course + 5 bootcamp commands, nothing else.
        assert_eq!(commands.len(), 9);
    }

    #[test]
    fn cascade_plan_without_courses_still_clears_every_bootcamp_key() {
        let id = Uuid::parse_str("5f3e6c9a-0002-4000-8000-000000000002").unwrap();
        let commands = pipe_commands(&cascade_delete_pipe(id, "moderntech-bootcamp", &[]));

        assert_eq!(commands.len(), 5);
        assert!(
            commands
                .iter()
                .any(|c| c[0] == "DEL" && c[1] == RedisKey::bootcamp_slug("moderntech-bootcamp"))
        );
        assert!(
            commands
                .iter()
                .any(|c| c[0] == "DEL" && c[1] == RedisKey::bootcamp(id))
        );
    }
}
