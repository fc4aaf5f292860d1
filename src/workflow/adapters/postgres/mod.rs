//! `PostgreSQL` adapters for workflow task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, WorkflowPgPool};
