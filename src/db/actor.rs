use crate::db::models::{DbCourse, DbStudent};
use crate::db::patch::{CourseFilter, DbPatchable, ResourceCreate, ResourcePatch, StudentFilter};
use crate::db::schema::SQLITE_INIT;
use crate::error::RostraError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Create a resource record and return its id.
    Create(ResourceCreate, RpcReplyPort<Result<i64, RostraError>>),

    /// Patch a resource record by id.
    Patch(ResourcePatch, RpcReplyPort<Result<(), RostraError>>),

    /// Get a course by id.
    GetCourse(i64, RpcReplyPort<Result<DbCourse, RostraError>>),

    /// List courses matching the filter, ordered by id.
    ListCourses(CourseFilter, RpcReplyPort<Result<Vec<DbCourse>, RostraError>>),

    /// Delete a course by id.
    DeleteCourse(i64, RpcReplyPort<Result<(), RostraError>>),

    /// Total number of course rows.
    CountCourses(RpcReplyPort<Result<i64, RostraError>>),

    /// Get a student by id.
    GetStudent(i64, RpcReplyPort<Result<DbStudent, RostraError>>),

    /// List students matching the filter, ordered by id.
    ListStudents(
        StudentFilter,
        RpcReplyPort<Result<Vec<DbStudent>, RostraError>>,
    ),

    /// Delete a student by id.
    DeleteStudent(i64, RpcReplyPort<Result<(), RostraError>>),

    /// Total number of student rows.
    CountStudents(RpcReplyPort<Result<i64, RostraError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn create(&self, create: ResourceCreate) -> Result<i64, RostraError> {
        ractor::call!(self.actor, DbActorMessage::Create, create)
            .map_err(|e| RostraError::RactorError(format!("DbActor Create RPC failed: {e}")))?
    }

    pub async fn patch(&self, patch: ResourcePatch) -> Result<(), RostraError> {
        ractor::call!(self.actor, DbActorMessage::Patch, patch)
            .map_err(|e| RostraError::RactorError(format!("DbActor Patch RPC failed: {e}")))?
    }

    pub async fn get_course(&self, id: i64) -> Result<DbCourse, RostraError> {
        ractor::call!(self.actor, DbActorMessage::GetCourse, id)
            .map_err(|e| RostraError::RactorError(format!("DbActor GetCourse RPC failed: {e}")))?
    }

    pub async fn list_courses(&self, filter: CourseFilter) -> Result<Vec<DbCourse>, RostraError> {
        ractor::call!(self.actor, DbActorMessage::ListCourses, filter)
            .map_err(|e| RostraError::RactorError(format!("DbActor ListCourses RPC failed: {e}")))?
    }

    pub async fn delete_course(&self, id: i64) -> Result<(), RostraError> {
        ractor::call!(self.actor, DbActorMessage::DeleteCourse, id)
            .map_err(|e| RostraError::RactorError(format!("DbActor DeleteCourse RPC failed: {e}")))?
    }

    pub async fn count_courses(&self) -> Result<i64, RostraError> {
        ractor::call!(self.actor, DbActorMessage::CountCourses)
            .map_err(|e| RostraError::RactorError(format!("DbActor CountCourses RPC failed: {e}")))?
    }

    pub async fn get_student(&self, id: i64) -> Result<DbStudent, RostraError> {
        ractor::call!(self.actor, DbActorMessage::GetStudent, id)
            .map_err(|e| RostraError::RactorError(format!("DbActor GetStudent RPC failed: {e}")))?
    }

    pub async fn list_students(&self, filter: StudentFilter) -> Result<Vec<DbStudent>, RostraError> {
        ractor::call!(self.actor, DbActorMessage::ListStudents, filter)
            .map_err(|e| RostraError::RactorError(format!("DbActor ListStudents RPC failed: {e}")))?
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), RostraError> {
        ractor::call!(self.actor, DbActorMessage::DeleteStudent, id).map_err(|e| {
            RostraError::RactorError(format!("DbActor DeleteStudent RPC failed: {e}"))
        })?
    }

    pub async fn count_students(&self) -> Result<i64, RostraError> {
        ractor::call!(self.actor, DbActorMessage::CountStudents).map_err(|e| {
            RostraError::RactorError(format!("DbActor CountStudents RPC failed: {e}"))
        })?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Create(create, reply) => {
                let res = self.create_resource(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Patch(patch, reply) => {
                let res = patch.apply_patch(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetCourse(id, reply) => {
                let res = self.get_course(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListCourses(filter, reply) => {
                let res = self.list_courses(&state.pool, filter).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteCourse(id, reply) => {
                let res = self.delete_course(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CountCourses(reply) => {
                let res = count_rows(&state.pool, "courses").await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetStudent(id, reply) => {
                let res = self.get_student(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListStudents(filter, reply) => {
                let res = self.list_students(&state.pool, filter).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteStudent(id, reply) => {
                let res = self.delete_student(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CountStudents(reply) => {
                let res = count_rows(&state.pool, "students").await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn create_resource(
        &self,
        pool: &SqlitePool,
        create: ResourceCreate,
    ) -> Result<i64, RostraError> {
        match create {
            ResourceCreate::Course(c) => {
                let now = Utc::now();
                let id: i64 = sqlx::query_scalar(
                    r#"
                INSERT INTO courses (name, created_at, updated_at)
                VALUES (?, ?, ?)
                RETURNING id
                "#,
                )
                .bind(c.name)
                .bind(now)
                .bind(now)
                .fetch_one(pool)
                .await?;

                Ok(id)
            }

            ResourceCreate::Student(s) => {
                let now = Utc::now();
                let id: i64 = sqlx::query_scalar(
                    r#"
                INSERT INTO students (name, created_at, updated_at)
                VALUES (?, ?, ?)
                RETURNING id
                "#,
                )
                .bind(s.name)
                .bind(now)
                .bind(now)
                .fetch_one(pool)
                .await?;

                Ok(id)
            }
        }
    }

    async fn get_course(&self, pool: &SqlitePool, id: i64) -> Result<DbCourse, RostraError> {
        let row = sqlx::query_as::<_, DbCourse>(
            r#"
        SELECT id, name, created_at, updated_at
        FROM courses
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.ok_or(RostraError::NotFound {
            resource: "course",
            id,
        })
    }

    async fn list_courses(
        &self,
        pool: &SqlitePool,
        filter: CourseFilter,
    ) -> Result<Vec<DbCourse>, RostraError> {
        let rows = sqlx::query_as::<_, DbCourse>(
            r#"
        SELECT id, name, created_at, updated_at
        FROM courses
        WHERE (?1 IS NULL OR id = ?1)
          AND (?2 IS NULL OR name = ?2)
        ORDER BY id
        "#,
        )
        .bind(filter.id)
        .bind(filter.name)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn delete_course(&self, pool: &SqlitePool, id: i64) -> Result<(), RostraError> {
        let res = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if res.rows_affected() == 0 {
            return Err(RostraError::NotFound {
                resource: "course",
                id,
            });
        }
        Ok(())
    }

    async fn get_student(&self, pool: &SqlitePool, id: i64) -> Result<DbStudent, RostraError> {
        let row = sqlx::query_as::<_, DbStudent>(
            r#"
        SELECT id, name, created_at, updated_at
        FROM students
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.ok_or(RostraError::NotFound {
            resource: "student",
            id,
        })
    }

    async fn list_students(
        &self,
        pool: &SqlitePool,
        filter: StudentFilter,
    ) -> Result<Vec<DbStudent>, RostraError> {
        let rows = sqlx::query_as::<_, DbStudent>(
            r#"
        SELECT id, name, created_at, updated_at
        FROM students
        WHERE (?1 IS NULL OR id = ?1)
          AND (?2 IS NULL OR name = ?2)
        ORDER BY id
        "#,
        )
        .bind(filter.id)
        .bind(filter.name)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn delete_student(&self, pool: &SqlitePool, id: i64) -> Result<(), RostraError> {
        let res = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if res.rows_affected() == 0 {
            return Err(RostraError::NotFound {
                resource: "student",
                id,
            });
        }
        Ok(())
    }
}

async fn count_rows(pool: &SqlitePool, table: &'static str) -> Result<i64, RostraError> {
    // `table` is a compile-time constant, never caller input.
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> DbActorHandle {
    let (actor, _jh) = ractor::Actor::spawn(
        Some("DbActor".to_string()),
        DbActor,
        database_url.to_string(),
    )
    .await
    .expect("failed to spawn DbActor");

    DbActorHandle { actor }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), RostraError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
