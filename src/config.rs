use std::{env, fmt::Display, str::FromStr};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub geocoder_url: String,
    pub max_photo_upload: u64,
    pub max_video_upload: u64,
    pub photo_upload_path: String,
    pub video_upload_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: try_load("PORT", "5000"),
            redis_url: env::var("REDIS_URL").expect("REDIS_URL must be set"),
            geocoder_url: try_load(
                "GEOCODER_URL",
                "https://nominatim.openstreetmap.org/search",
            ),
            // 1 MB photos, 50 MB videos unless overridden
            max_photo_upload: try_load("MAX_PHOTO_UPLOAD", "1000000"),
            max_video_upload: try_load("MAX_VIDEO_UPLOAD", "50000000"),
            photo_upload_path: try_load("PHOTO_UPLOAD_PATH", "./public/uploads"),
            video_upload_path: try_load("VIDEO_UPLOAD_PATH", "./public/uploads"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            tracing::info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .unwrap_or_else(|e| panic!("Invalid {key} value: {e}"))
}
