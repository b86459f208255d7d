use rostra::db::{ResourceCreate, ResourcePatch, StudentCreate, StudentFilter, StudentPatch};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;
use tokio::fs;

#[tokio::test]
async fn test_student_db_actor_baseline() {
    let tmp_dir = std::env::temp_dir();
    let mut hasher = DefaultHasher::new();
    SystemTime::now().hash(&mut hasher);
    let db_file_name = format!("test_student_db_{}.sqlite", hasher.finish());
    let db_path = tmp_dir.join(db_file_name);
    let database_url = format!("sqlite:{}", db_path.to_str().unwrap());

    let db = rostra::db::spawn(&database_url).await;

    // 1. Fresh DB: empty list, zero count
    let students = db.list_students(StudentFilter::default()).await.unwrap();
    assert!(students.is_empty(), "Expected no students initially");
    assert_eq!(db.count_students().await.unwrap(), 0);

    // 2. Create two students with the same name (names are not unique)
    let name = "Ada Lovelace".to_string();
    let first = db
        .create(ResourceCreate::Student(StudentCreate { name: name.clone() }))
        .await
        .unwrap();
    let second = db
        .create(ResourceCreate::Student(StudentCreate { name: name.clone() }))
        .await
        .unwrap();
    assert!(first > 0);
    assert!(second > first, "Expected ids to be assigned in order");
    assert_eq!(db.count_students().await.unwrap(), 2);

    // 3. Name filter returns both rows, ordered by id
    let by_name = db
        .list_students(StudentFilter {
            id: None,
            name: Some(name.clone()),
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 2);
    assert_eq!(by_name.first().unwrap().id, first);
    assert_eq!(by_name.last().unwrap().id, second);

    // 4. Patch one of them; the other is untouched
    db.patch(ResourcePatch::Student {
        id: second,
        patch: StudentPatch {
            name: Some("Grace Hopper".to_string()),
        },
    })
    .await
    .unwrap();

    assert_eq!(db.get_student(first).await.unwrap().name, name);
    assert_eq!(db.get_student(second).await.unwrap().name, "Grace Hopper");

    // 5. Delete both; count tracks each removal
    db.delete_student(first).await.unwrap();
    assert_eq!(db.count_students().await.unwrap(), 1);
    db.delete_student(second).await.unwrap();
    assert_eq!(db.count_students().await.unwrap(), 0);
    assert!(db.get_student(second).await.is_err());

    // Clean up the temporary database file
    let wal_path = std::path::PathBuf::from(format!("{}-wal", db_path.to_string_lossy()));
    let shm_path = std::path::PathBuf::from(format!("{}-shm", db_path.to_string_lossy()));
    let _ = fs::remove_file(&wal_path).await;
    let _ = fs::remove_file(&shm_path).await;
    fs::remove_file(&db_path).await.unwrap();
}
