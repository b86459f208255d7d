//! ResourcePatch -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::patch::{CoursePatch, DbPatchable, ResourcePatch, StudentPatch};
use crate::error::RostraError;

#[async_trait]
impl DbPatchable for ResourcePatch {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), RostraError> {
        match self {
            ResourcePatch::Course { id, patch } => {
                let CoursePatch { name } = patch.clone();

                let name_set = name.is_some();
                let updated_at = Utc::now();

                // Use the bind query API so we don't have to keep SQLx's offline cache in sync.
                let res = sqlx::query(
                    r#"
                    UPDATE courses
                    SET
                        name = COALESCE(?, name),
                        updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(name)
                .bind(updated_at)
                .bind(*id)
                .execute(pool)
                .await?;

                let affected = res.rows_affected();
                debug!(
                    resource = "course",
                    id,
                    affected,
                    updated_at = %updated_at,
                    name_set,
                    "db patch applied"
                );

                if affected == 0 {
                    return Err(RostraError::NotFound {
                        resource: "course",
                        id: *id,
                    });
                }

                Ok(())
            }

            ResourcePatch::Student { id, patch } => {
                let StudentPatch { name } = patch.clone();

                let name_set = name.is_some();
                let updated_at = Utc::now();

                let res = sqlx::query(
                    r#"
                    UPDATE students
                    SET
                        name = COALESCE(?, name),
                        updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(name)
                .bind(updated_at)
                .bind(*id)
                .execute(pool)
                .await?;

                let affected = res.rows_affected();
                debug!(
                    resource = "student",
                    id,
                    affected,
                    updated_at = %updated_at,
                    name_set,
                    "db patch applied"
                );

                if affected == 0 {
                    return Err(RostraError::NotFound {
                        resource: "student",
                        id: *id,
                    });
                }

                Ok(())
            }
        }
    }
}
