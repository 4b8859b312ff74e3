pub mod bootcamp;
pub mod course;
pub mod redis;

use serde::Serialize;

pub use bootcamp::{Bootcamp, Career, CreateBootcamp, Location, UpdateBootcamp};
pub use course::{Course, CreateCourse, MinimumSkill, UpdateCourse};

/// Envelope for single-record responses: `{success, data}`.
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope for collection responses: `{success, count, data}`.
#[derive(Serialize)]
pub struct CountResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> CountResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}
