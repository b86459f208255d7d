//! Create/patch/filter payloads shared by the DB actor and the HTTP layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::RostraError;

/// Abstraction for applying a patch payload/envelope to the database.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), RostraError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCreate {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCreate {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoursePatch {
    /// `None` => do not change; `Some(v)` => update
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    /// `None` => do not change; `Some(v)` => update
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ResourceCreate {
    Course(CourseCreate),
    Student(StudentCreate),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ResourcePatch {
    Course { id: i64, patch: CoursePatch },
    Student { id: i64, patch: StudentPatch },
}

/// Listing filter; conditions are exact matches, AND-ed when both present.
/// Also serves as the query-string shape of the collection endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
}
