//! Diesel row models for workflow task persistence.

use super::schema::workflow_tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for workflow task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workflow_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning form identifier.
    pub form_id: uuid::Uuid,
    /// Document kind.
    pub kind: String,
    /// Evaluation period.
    pub period: String,
    /// Participant identities JSON payload.
    pub participants: Value,
    /// Approval status.
    pub status: String,
    /// Checker sign-off timestamp.
    pub checked_at: Option<DateTime<Utc>>,
    /// Approver sign-off timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for workflow task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workflow_tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning form identifier.
    pub form_id: uuid::Uuid,
    /// Document kind.
    pub kind: String,
    /// Evaluation period.
    pub period: String,
    /// Participant identities JSON payload.
    pub participants: Value,
    /// Approval status.
    pub status: String,
    /// Checker sign-off timestamp.
    pub checked_at: Option<DateTime<Utc>>,
    /// Approver sign-off timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
