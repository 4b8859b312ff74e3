use uuid::Uuid;

pub struct RedisKey;

impl RedisKey {
    pub fn bootcamp(id: Uuid) -> String {
        format!("bootcamp:{id}")
    }

    /// Index set holding every bootcamp id.
    pub fn bootcamps() -> String {
        "bootcamps".to_string()
    }

    /// slug -> bootcamp id, written with SET NX to enforce uniqueness.
    pub fn bootcamp_slug(slug: &str) -> String {
        format!("bootcamp_slug:{slug}")
    }

    /// Geo sorted set of bootcamp locations (member = bootcamp id).
    pub fn bootcamps_geo() -> String {
        "bootcamps:geo".to_string()
    }

    /// Back-reference set of course ids owned by one bootcamp.
    pub fn bootcamp_courses(id: Uuid) -> String {
        format!("bootcamp:{id}:courses")
    }

    pub fn course(id: Uuid) -> String {
        format!("course:{id}")
    }

    /// Index set holding every course id.
    pub fn courses() -> String {
        "courses".to_string()
    }
}
