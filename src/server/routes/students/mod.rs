use crate::server::router::RostraState;
use axum::{Router, routing::get};

pub mod handlers;

pub fn router() -> Router<RostraState> {
    Router::new()
        .route(
            "/api/v1/students/",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/api/v1/students/{id}/",
            get(handlers::get_student)
                .put(handlers::replace_student)
                .patch(handlers::update_student)
                .delete(handlers::delete_student),
        )
}
