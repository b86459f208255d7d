use crate::server::router::RostraState;
use axum::{Router, routing::get};

pub mod handlers;

pub fn router() -> Router<RostraState> {
    Router::new()
        .route(
            "/api/v1/courses/",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/api/v1/courses/{id}/",
            get(handlers::get_course)
                .put(handlers::replace_course)
                .patch(handlers::update_course)
                .delete(handlers::delete_course),
        )
}
