pub mod bootcamp;
pub mod course;
pub mod upload;

use uuid::Uuid;

use crate::errors::AppError;

pub use bootcamp::{
    create_bootcamp_handler, delete_bootcamp_handler, get_bootcamp_handler,
    get_bootcamps_handler, get_bootcamps_in_radius_handler, update_bootcamp_handler,
};
pub use course::{
    create_course_handler, delete_course_handler, get_bootcamp_courses_handler,
    get_course_handler, get_courses_handler, update_course_handler,
};
pub use upload::{bootcamp_photo_upload_handler, bootcamp_video_upload_handler};

/// A malformed identifier reads the same as a missing record: 404 with a
/// generic message, never a 400.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId)
}
