pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub use delete::delete_course;
pub use get::{get_all_courses, get_course, get_courses_for_bootcamp};
pub use post::create_course;
pub use put::update_course;
