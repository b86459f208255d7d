//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;

mod patch_impl;

pub use models::{DbCourse, DbStudent};
pub use patch::{
    CourseCreate, CourseFilter, CoursePatch, DbPatchable, ResourceCreate, ResourcePatch,
    StudentCreate, StudentFilter, StudentPatch,
};
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
