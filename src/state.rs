use std::sync::Arc;

use bb8::Pool;
use bb8_redis::RedisConnectionManager;

use crate::{config::Config, geocoder::Geocoder};

#[derive(Clone)]
pub struct AppState {
    pub redis: RedisClient,
    pub config: Arc<Config>,
    pub geocoder: Geocoder,
}

pub type RedisClient = Pool<RedisConnectionManager>;
