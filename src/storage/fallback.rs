//! Fallback Record Store - Tables Emulated on a Flat Namespace
//!
//! `TigerStyle`: Relational semantics from set/get/delete/list alone.
//!
//! Each logical row is one serialized JSON record stored under the key
//! `"{table}_{rowId}"`. Scanning a table means enumerating every key with
//! that table's prefix. Filtering happens in memory through the condition
//! matcher; the substrate itself knows nothing about tables, columns, or
//! uniqueness.
//!
//! # Limitations (deliberate, caller-visible)
//!
//! - Only equality-conjunction filters; ranges, `OR`, joins, ordering, and
//!   limits require a full-table select plus in-memory post-processing.
//! - No referential integrity: deleting a parent row never cascades.
//! - Read-modify-write updates are not locked; concurrent writers to the
//!   same row race and the last write wins.

use std::sync::Arc;

use async_trait::async_trait;

use super::backend::StorageBackend;
use super::error::{StorageError, StorageResult};
use super::kv::KeyValueStore;
use crate::condition::Condition;
use crate::record::{Record, RowSet, Value};
use crate::schema::{self, TableName};

// =============================================================================
// FallbackStore
// =============================================================================

/// Table emulation over a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct FallbackStore {
    kv: Arc<dyn KeyValueStore>,
}

impl FallbackStore {
    /// Create a store over the given substrate.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn row_key(table: TableName, id: &str) -> String {
        format!("{}_{id}", table.as_str())
    }

    fn table_prefix(table: TableName) -> String {
        format!("{}_", table.as_str())
    }

    /// Enumerate every `(key, record)` pair in a table's namespace.
    ///
    /// Records that fail to deserialize are skipped with a warning rather
    /// than failing the whole read; read paths stay resilient.
    async fn scan(&self, table: TableName) -> StorageResult<Vec<(String, Record)>> {
        let prefix = Self::table_prefix(table);
        let def = schema::table(table);

        let mut rows = Vec::new();
        for key in self.kv.keys().await? {
            if !key.starts_with(&prefix) {
                continue;
            }
            // A concurrent remove between keys() and get() just skips the row.
            let Some(serialized) = self.kv.get(&key).await? else {
                continue;
            };
            match serde_json::from_str::<serde_json::Value>(&serialized)
                .ok()
                .and_then(Record::from_json_value)
            {
                Some(record) => rows.push((key, def.normalize_read(record))),
                None => {
                    tracing::warn!(key = %key, "skipping undecodable record");
                }
            }
        }
        Ok(rows)
    }

    async fn write_record(&self, key: &str, record: &Record) -> StorageResult<()> {
        let serialized = serde_json::to_string(&record.to_json_value())
            .map_err(|e| StorageError::serialization(e.to_string()))?;
        self.kv.set(key, &serialized).await
    }
}

#[async_trait]
impl StorageBackend for FallbackStore {
    /// Tables exist implicitly via key prefixing; nothing to create.
    async fn ensure_schema(&self) -> StorageResult<()> {
        Ok(())
    }

    #[tracing::instrument(skip(self, record), fields(table = %table))]
    async fn insert(&self, table: TableName, record: Record) -> StorageResult<String> {
        let record = schema::table(table).normalize_insert(record);
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::serialization("normalized record missing id"))?
            .to_string();

        self.write_record(&Self::row_key(table, &id), &record).await?;
        Ok(id)
    }

    #[tracing::instrument(skip(self, condition), fields(table = %table))]
    async fn select(&self, table: TableName, condition: &Condition) -> StorageResult<RowSet> {
        let rows = self
            .scan(table)
            .await?
            .into_iter()
            .map(|(_, record)| record)
            .filter(|record| condition.matches(record))
            .collect();
        Ok(RowSet::new(rows))
    }

    #[tracing::instrument(skip(self, condition, changes), fields(table = %table))]
    async fn update(
        &self,
        table: TableName,
        condition: &Condition,
        changes: Record,
    ) -> StorageResult<u64> {
        let changes = schema::table(table).normalize_update(changes);
        if changes.is_empty() {
            return Ok(0);
        }

        let mut affected = 0;
        for (key, mut record) in self.scan(table).await? {
            if !condition.matches(&record) {
                continue;
            }
            // Merge in place and re-serialize at the same key; a row is
            // never re-keyed by an update.
            record.merge(changes.clone());
            self.write_record(&key, &record).await?;
            affected += 1;
        }
        Ok(affected)
    }

    #[tracing::instrument(skip(self, condition), fields(table = %table))]
    async fn delete(&self, table: TableName, condition: &Condition) -> StorageResult<u64> {
        if matches!(condition, Condition::Unsupported) {
            return Ok(0);
        }

        // Match-all clears the whole namespace without deserializing rows.
        if condition.is_match_all() {
            let prefix = Self::table_prefix(table);
            let mut removed = 0;
            for key in self.kv.keys().await? {
                if key.starts_with(&prefix) && self.kv.remove(&key).await? {
                    removed += 1;
                }
            }
            return Ok(removed);
        }

        let mut removed = 0;
        for (key, record) in self.scan(table).await? {
            if condition.matches(&record) && self.kv.remove(&key).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

// =============================================================================
// Tests
// =============================================================================
