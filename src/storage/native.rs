//! Native Query Executor - Embedded Relational Engine
//!
//! `TigerStyle`: Parameterized statements, short-lived transactions.
//!
//! A thin wrapper over an embedded SQLite pool. Every write runs inside a
//! single transaction per call, so a failed operation has no partial row
//! effects. Values are always bound positionally, never interpolated.
//! Unique-key failures surface as [`StorageError::Constraint`] so the facade
//! can convert upsert-shaped inserts into updates.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::backend::StorageBackend;
use super::error::{StorageError, StorageResult};
use crate::condition::Condition;
use crate::constants::NATIVE_POOL_CONNECTIONS_MAX;
use crate::record::{Record, RowSet, Value};
use crate::schema::{self, ColumnType, TableDef, TableName};

// =============================================================================
// NativeExecutor
// =============================================================================

/// SQLite-backed storage executor.
#[derive(Debug, Clone)]
pub struct NativeExecutor {
    pool: SqlitePool,
}

impl NativeExecutor {
    /// Open a database by URL (`sqlite::memory:` or `sqlite://path?mode=rwc`).
    ///
    /// # Errors
    /// Returns a connection error if the engine cannot open the database.
    /// The capability detector treats that as "native unavailable", not as
    /// a fatal condition.
    pub async fn open(url: &str) -> StorageResult<Self> {
        // Preconditions
        assert!(!url.is_empty(), "database url cannot be empty");
        assert!(url.starts_with("sqlite:"), "url must be a sqlite url");

        let pool = SqlitePoolOptions::new()
            .max_connections(NATIVE_POOL_CONNECTIONS_MAX)
            .connect(url)
            .await
            .map_err(|e| StorageError::connection(format!("failed to open database: {e}")))?;

        Ok(Self { pool })
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// =============================================================================
// Binding and Row Mapping
// =============================================================================

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>;

/// Bind one scalar positionally. Booleans become integers, JSON becomes
/// text; both are undone by the schema's read normalization.
fn bind_value<'q>(query: SqliteQuery<'q>, value: &Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Integer(i) => query.bind(*i),
        Value::Real(f) => query.bind(*f),
        Value::Text(s) => query.bind(s.clone()),
        Value::Boolean(b) => query.bind(i64::from(*b)),
        Value::Json(v) => query.bind(v.to_string()),
    }
}

fn map_engine_error(error: &sqlx::Error) -> StorageError {
    match error {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            StorageError::constraint(db.message())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::PoolClosed => {
            StorageError::connection(error.to_string())
        }
        _ => StorageError::query(error.to_string()),
    }
}

/// Parse an engine row into a record, typed by the table definition.
fn decode_row(def: &TableDef, row: &SqliteRow) -> StorageResult<Record> {
    let mut record = Record::new();
    for col in &def.columns {
        let value = match col.column_type {
            ColumnType::Text | ColumnType::Timestamp | ColumnType::Json => row
                .try_get::<Option<String>, _>(col.name)
                .map(|v| v.map(Value::Text)),
            ColumnType::Integer | ColumnType::Boolean => row
                .try_get::<Option<i64>, _>(col.name)
                .map(|v| v.map(Value::Integer)),
            ColumnType::Real => row
                .try_get::<Option<f64>, _>(col.name)
                .map(|v| v.map(Value::Real)),
        }
        .map_err(|e| StorageError::query(format!("column {}: {e}", col.name)))?;

        if let Some(value) = value {
            record.set(col.name, value);
        }
    }
    Ok(def.normalize_read(record))
}

// =============================================================================
// StorageBackend Implementation
// =============================================================================

#[async_trait]
impl StorageBackend for NativeExecutor {
    /// Issue `CREATE TABLE IF NOT EXISTS` plus index DDL for every logical
    /// table. Idempotent by construction.
    async fn ensure_schema(&self) -> StorageResult<()> {
        for def in schema::tables() {
            sqlx::query(&def.sql_create())
                .execute(&self.pool)
                .await
                .map_err(|e| map_engine_error(&e))?;
            for index_sql in def.sql_indexes() {
                sqlx::query(&index_sql)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| map_engine_error(&e))?;
            }
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, record), fields(table = %table))]
    async fn insert(&self, table: TableName, record: Record) -> StorageResult<String> {
        let def = schema::table(table);
        let record = def.normalize_insert(record);
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::serialization("normalized record missing id"))?
            .to_string();

        let columns: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.as_str(),
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in record.iter() {
            query = bind_value(query, value);
        }

        let mut tx = self.pool.begin().await.map_err(|e| map_engine_error(&e))?;
        query
            .execute(&mut *tx)
            .await
            .map_err(|e| map_engine_error(&e))?;
        tx.commit().await.map_err(|e| map_engine_error(&e))?;

        Ok(id)
    }

    #[tracing::instrument(skip(self, condition), fields(table = %table))]
    async fn select(&self, table: TableName, condition: &Condition) -> StorageResult<RowSet> {
        let def = schema::table(table);
        let Some((fragment, binds)) = condition.to_sql() else {
            // Outside the grammar: match nothing, never everything.
            return Ok(RowSet::empty());
        };

        let sql = format!(
            "SELECT * FROM {} WHERE {} ORDER BY id",
            table.as_str(),
            fragment
        );
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = bind_value(query, value);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_engine_error(&e))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(decode_row(def, row)?);
        }
        Ok(RowSet::new(records))
    }

    #[tracing::instrument(skip(self, condition, changes), fields(table = %table))]
    async fn update(
        &self,
        table: TableName,
        condition: &Condition,
        changes: Record,
    ) -> StorageResult<u64> {
        let def = schema::table(table);
        let changes = def.normalize_update(changes);
        if changes.is_empty() {
            return Ok(0);
        }
        let Some((fragment, binds)) = condition.to_sql() else {
            return Ok(0);
        };

        let assignments = changes
            .iter()
            .map(|(name, _)| format!("{name} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            table.as_str(),
            assignments,
            fragment
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in changes.iter() {
            query = bind_value(query, value);
        }
        for value in binds {
            query = bind_value(query, value);
        }

        let mut tx = self.pool.begin().await.map_err(|e| map_engine_error(&e))?;
        let result = query
            .execute(&mut *tx)
            .await
            .map_err(|e| map_engine_error(&e))?;
        tx.commit().await.map_err(|e| map_engine_error(&e))?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip(self, condition), fields(table = %table))]
    async fn delete(&self, table: TableName, condition: &Condition) -> StorageResult<u64> {
        let Some((fragment, binds)) = condition.to_sql() else {
            return Ok(0);
        };

        let sql = format!("DELETE FROM {} WHERE {}", table.as_str(), fragment);
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = bind_value(query, value);
        }

        let mut tx = self.pool.begin().await.map_err(|e| map_engine_error(&e))?;
        let result = query
            .execute(&mut *tx)
            .await
            .map_err(|e| map_engine_error(&e))?;
        tx.commit().await.map_err(|e| map_engine_error(&e))?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn executor() -> NativeExecutor {
        let exec = NativeExecutor::open("sqlite::memory:").await.unwrap();
        exec.ensure_schema().await.unwrap();
        exec
    }

    fn vitamin_d(user_id: &str) -> Record {
        Record::new()
            .with("user_id", user_id)
            .with("name", "Vitamin D3")
            .with("dose", "2000 IU")
            .with("time", "08:00")
            .with("taken", false)
    }

    #[tokio::test]
    async fn test_ensure_schema_idempotent() {
        let exec = executor().await;
        exec.ensure_schema().await.unwrap();
        exec.ensure_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_select_round_trip() {
        let exec = executor().await;
        let id = exec
            .insert(TableName::Supplements, vitamin_d("u1"))
            .await
            .unwrap();

        let rows = exec
            .select(TableName::Supplements, &Condition::eq("id", id.clone()))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        let row = rows.item(0).unwrap();
        assert_eq!(row.get("id").and_then(Value::as_str), Some(id.as_str()));
        // Boolean read back as boolean, not 0/1
        assert_eq!(row.get("taken"), Some(&Value::Boolean(false)));
        // JSON default read back as JSON
        assert_eq!(
            row.get("completed_dates"),
            Some(&Value::Json(serde_json::json!([])))
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_counts() {
        let exec = executor().await;
        exec.insert(TableName::Supplements, vitamin_d("u1"))
            .await
            .unwrap();
        exec.insert(TableName::Supplements, vitamin_d("u1"))
            .await
            .unwrap();

        let by_user = Condition::eq("user_id", "u1");
        let affected = exec
            .update(
                TableName::Supplements,
                &by_user,
                Record::new().with("taken", true),
            )
            .await
            .unwrap();
        assert_eq!(affected, 2);

        let removed = exec.delete(TableName::Supplements, &by_user).await.unwrap();
        assert_eq!(removed, 2);

        let rows = exec.select(TableName::Supplements, &by_user).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_unique_key_is_constraint_violation() {
        let exec = executor().await;
        let alice = Record::new()
            .with("email", "alice@vita.app")
            .with("name", "Alice");

        exec.insert(TableName::Users, alice.clone()).await.unwrap();
        let err = exec.insert(TableName::Users, alice).await.unwrap_err();
        assert!(err.is_constraint());
    }

    #[tokio::test]
    async fn test_unsupported_condition_fails_closed() {
        let exec = executor().await;
        exec.insert(TableName::Supplements, vitamin_d("u1"))
            .await
            .unwrap();

        let unsupported = Condition::parse("user_id = ? OR 1=1", &[Value::Text("u1".into())]);
        let rows = exec
            .select(TableName::Supplements, &unsupported)
            .await
            .unwrap();
        assert!(rows.is_empty());

        let removed = exec
            .delete(TableName::Supplements, &unsupported)
            .await
            .unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_non_identifier_column_matches_nothing() {
        let exec = executor().await;
        exec.insert(TableName::Supplements, vitamin_d("u1"))
            .await
            .unwrap();

        // A typed condition with a hostile column name must never reach the
        // engine as interpolated SQL; it matches nothing, same as the
        // fallback path.
        let hostile = Condition::eq("name = name OR 1=1 --", "x");
        let rows = exec
            .select(TableName::Supplements, &hostile)
            .await
            .unwrap();
        assert!(rows.is_empty());

        let removed = exec.delete(TableName::Supplements, &hostile).await.unwrap();
        assert_eq!(removed, 0);

        let all = exec
            .select(TableName::Supplements, &Condition::all())
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_match_all_delete_clears_table() {
        let exec = executor().await;
        exec.insert(TableName::Supplements, vitamin_d("u1"))
            .await
            .unwrap();
        exec.insert(TableName::Supplements, vitamin_d("u2"))
            .await
            .unwrap();

        let removed = exec
            .delete(TableName::Supplements, &Condition::all())
            .await
            .unwrap();
        assert_eq!(removed, 2);
    }
}
