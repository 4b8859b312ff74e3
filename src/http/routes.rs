use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, put},
};

use crate::{
    http::handlers::{
        bootcamp_photo_upload_handler, bootcamp_video_upload_handler, create_bootcamp_handler,
        create_course_handler, delete_bootcamp_handler, delete_course_handler,
        get_bootcamp_courses_handler, get_bootcamp_handler, get_bootcamps_handler,
        get_bootcamps_in_radius_handler, get_course_handler, get_courses_handler,
        update_bootcamp_handler, update_course_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/bootcamps",
            get(get_bootcamps_handler).post(create_bootcamp_handler),
        )
        .route(
            "/api/v1/bootcamps/radius/{zipcode}/{distance}",
            get(get_bootcamps_in_radius_handler),
        )
        .route(
            "/api/v1/bootcamps/{id}",
            get(get_bootcamp_handler)
                .put(update_bootcamp_handler)
                .delete(delete_bootcamp_handler),
        )
        // Uploads enforce their own byte ceilings so an oversize body gets
        // the JSON error envelope instead of a bare 413 from the extractor.
        .route(
            "/api/v1/bootcamps/{id}/photo",
            put(bootcamp_photo_upload_handler).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/v1/bootcamps/{id}/video",
            put(bootcamp_video_upload_handler).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/v1/bootcamps/{id}/courses",
            get(get_bootcamp_courses_handler).post(create_course_handler),
        )
        .route("/api/v1/courses", get(get_courses_handler))
        .route(
            "/api/v1/courses/{id}",
            get(get_course_handler)
                .put(update_course_handler)
                .delete(delete_course_handler),
        )
        .with_state(state)
}
