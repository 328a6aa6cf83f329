//! Repository for the `time_entries` table.

use focal_core::types::DbId;
use focal_core::visibility::EntryScope;
use sqlx::{FromRow, PgPool};

use crate::models::time_entry::{
    CreateTimeEntry, TaskRef, TimeEntry, TimeEntryDetail, UpdateTimeEntry,
};
use crate::models::user::UserRef;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, task_id, hours, transactions, transaction_type, date, created_at, updated_at";

const DETAIL_SELECT: &str = "\
    SELECT e.id, e.user_id, e.task_id, e.hours, e.transactions, e.transaction_type, \
           e.date, e.created_at, e.updated_at, \
           t.title AS task_title, u.name AS user_name \
    FROM time_entries e \
    LEFT JOIN tasks t ON t.id = e.task_id \
    LEFT JOIN users u ON u.id = e.user_id";

#[derive(FromRow)]
struct EntryWithRefs {
    #[sqlx(flatten)]
    entry: TimeEntry,
    task_title: Option<String>,
    user_name: Option<String>,
}

impl From<EntryWithRefs> for TimeEntryDetail {
    fn from(row: EntryWithRefs) -> Self {
        let task = row.task_title.map(|title| TaskRef {
            id: row.entry.task_id,
            title,
        });
        let user = row.user_name.map(|name| UserRef {
            id: row.entry.user_id,
            name,
            email: None,
        });
        TimeEntryDetail {
            entry: row.entry,
            task,
            user,
        }
    }
}

/// Provides CRUD operations for time entries.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// List the entries inside `scope`, newest date first, with task and owner resolved.
    pub async fn list(pool: &PgPool, scope: &EntryScope) -> Result<Vec<TimeEntryDetail>, sqlx::Error> {
        // A NULL owner list means "no restriction".
        let query = format!(
            "{DETAIL_SELECT} \
             WHERE ($1::bigint[] IS NULL OR e.user_id = ANY($1)) \
             ORDER BY e.date DESC, e.id DESC"
        );
        let rows = sqlx::query_as::<_, EntryWithRefs>(&query)
            .bind(scope.user_ids())
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(TimeEntryDetail::from).collect())
    }

    /// Find a time entry by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_entries WHERE id = $1");
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a time entry with its task and owner resolved.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TimeEntryDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE e.id = $1");
        let row = sqlx::query_as::<_, EntryWithRefs>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(TimeEntryDetail::from))
    }

    /// Insert a new time entry. A missing date defaults to today.
    pub async fn create(pool: &PgPool, input: &CreateTimeEntry) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries (user_id, task_id, hours, transactions, transaction_type, date) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(input.user_id)
            .bind(input.task_id)
            .bind(input.hours)
            .bind(input.transactions)
            .bind(input.transaction_type.map(|t| t.as_str()))
            .bind(input.date)
            .fetch_one(pool)
            .await
    }

    /// Update a time entry. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTimeEntry,
    ) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE time_entries SET \
                task_id = COALESCE($2, task_id), \
                hours = COALESCE($3, hours), \
                transactions = COALESCE($4, transactions), \
                transaction_type = COALESCE($5, transaction_type), \
                date = COALESCE($6, date) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .bind(input.task_id)
            .bind(input.hours)
            .bind(input.transactions)
            .bind(input.transaction_type.map(|t| t.as_str()))
            .bind(input.date)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a time entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
