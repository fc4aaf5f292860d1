//! Diesel schema for workflow task persistence.

diesel::table! {
    /// Workflow task records, one per (form, period).
    workflow_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning form identifier.
        form_id -> Uuid,
        /// Document kind.
        #[max_length = 20]
        kind -> Varchar,
        /// Evaluation period.
        #[max_length = 30]
        period -> Varchar,
        /// Participant identities payload.
        participants -> Jsonb,
        /// Approval status.
        #[max_length = 30]
        status -> Varchar,
        /// Checker sign-off timestamp.
        checked_at -> Nullable<Timestamptz>,
        /// Approver sign-off timestamp.
        approved_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
