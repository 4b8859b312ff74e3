pub mod delete;
pub mod geo;
pub mod get;
pub mod media;
pub mod post;
pub mod put;

pub use delete::delete_bootcamp;
pub use geo::get_bootcamps_in_radius;
pub use get::{get_all_bootcamps, get_bootcamp};
pub use media::set_bootcamp_media;
pub use post::create_bootcamp;
pub use put::update_bootcamp;
