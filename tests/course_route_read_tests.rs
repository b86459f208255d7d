use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    fs,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use rostra::db::{CourseCreate, DbActorHandle, DbCourse, ResourceCreate};

/// Insert a course through the db handle and return the stored row.
async fn course_factory(db: &DbActorHandle, name: &str) -> DbCourse {
    let id = db
        .create(ResourceCreate::Course(CourseCreate {
            name: name.to_string(),
        }))
        .await
        .expect("failed to create course");
    db.get_course(id).await.expect("failed to fetch created course")
}

#[tokio::test]
async fn course_routes_retrieve_list_and_filter() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "rostra-course-read-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let db = rostra::db::spawn(&database_url).await;

    let mut courses = Vec::new();
    for i in 0..10 {
        courses.push(course_factory(&db, &format!("course-{i}")).await);
    }

    let state = rostra::server::router::RostraState::new(db.clone());
    let app = rostra::server::router::rostra_router(state);

    // 1) member URL returns the single record with the matching id
    let course_id = courses[5].id;
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/courses/{course_id}/"))
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let data: Value = serde_json::from_slice(&body).expect("response body was not JSON");
    assert_eq!(data["id"], json!(course_id));
    assert_eq!(data["name"], json!(courses[5].name));

    // 2) collection URL returns every seeded record
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/courses/")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let data: Value = serde_json::from_slice(&body).expect("response body was not JSON");
    let items = data.as_array().expect("expected a JSON array");
    assert_eq!(items.len(), courses.len());

    // 3) filtering by id narrows to the matching record
    let course_id = courses[2].id;
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/courses/?id={course_id}"))
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let data: Value = serde_json::from_slice(&body).expect("response body was not JSON");
    let items = data.as_array().expect("expected a JSON array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], json!(course_id));

    // 4) filtering by name narrows to the matching record
    let course_name = courses[2].name.clone();
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/courses/?name={course_name}"))
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let data: Value = serde_json::from_slice(&body).expect("response body was not JSON");
    let items = data.as_array().expect("expected a JSON array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], json!(course_name));

    let _ = fs::remove_file(format!("{}-wal", temp_path.display()));
    let _ = fs::remove_file(format!("{}-shm", temp_path.display()));
    let _ = fs::remove_file(&temp_path);
}
