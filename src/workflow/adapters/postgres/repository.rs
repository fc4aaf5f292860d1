//! `PostgreSQL` repository implementation for workflow task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::workflow_tasks,
};
use crate::workflow::{
    domain::{
        DocumentKind, FormId, Participants, Period, PersistedTaskData, Task, TaskId, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by workflow adapters.
pub type WorkflowPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Status commits are a conditional update filtered on the expected
/// current status; an affected-row count of zero is resolved to either
/// not-found or conflict by a follow-up lookup.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: WorkflowPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let form_id = task.form_id();
        let period = task.period();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(workflow_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_form_period_unique_violation(info.as_ref()) =>
                    {
                        TaskRepositoryError::DuplicatePeriod(form_id, period)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            find_row_by_id(connection, id)?.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_form(&self, form_id: FormId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = workflow_tasks::table
                .filter(workflow_tasks::form_id.eq(form_id.into_inner()))
                .order(workflow_tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn commit_transition(
        &self,
        task: &Task,
        expected: TaskStatus,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_status = task.status().as_str().to_owned();
        let checked_at = task.checked_at();
        let approved_at = task.approved_at();
        let updated_at = task.updated_at();

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                workflow_tasks::table
                    .filter(workflow_tasks::id.eq(task_id.into_inner()))
                    .filter(workflow_tasks::status.eq(expected.as_str())),
            )
            .set((
                workflow_tasks::status.eq(&new_status),
                workflow_tasks::checked_at.eq(checked_at),
                workflow_tasks::approved_at.eq(approved_at),
                workflow_tasks::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected == 0 {
                return match find_row_by_id(connection, task_id)? {
                    Some(_) => Err(TaskRepositoryError::Conflict { task_id, expected }),
                    None => Err(TaskRepositoryError::NotFound(task_id)),
                };
            }
            Ok(())
        })
        .await
    }
}

fn find_row_by_id(
    connection: &mut PgConnection,
    id: TaskId,
) -> TaskRepositoryResult<Option<TaskRow>> {
    workflow_tasks::table
        .filter(workflow_tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let participants =
        serde_json::to_value(task.participants()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        form_id: task.form_id().into_inner(),
        kind: task.kind().as_str().to_owned(),
        period: task.period().as_str().to_owned(),
        participants,
        status: task.status().as_str().to_owned(),
        checked_at: task.checked_at(),
        approved_at: task.approved_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        form_id,
        kind: persisted_kind,
        period: persisted_period,
        participants: persisted_participants,
        status: persisted_status,
        checked_at,
        approved_at,
        created_at,
        updated_at,
    } = row;

    let kind = DocumentKind::try_from(persisted_kind.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let period =
        Period::try_from(persisted_period.as_str()).map_err(TaskRepositoryError::persistence)?;
    let participants = serde_json::from_value::<Participants>(persisted_participants)
        .map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        form_id: FormId::from_uuid(form_id),
        kind,
        period,
        participants,
        status,
        checked_at,
        approved_at,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn is_form_period_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_workflow_tasks_form_period_unique")
}
