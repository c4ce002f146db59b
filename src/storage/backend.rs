//! Storage Backend Trait
//!
//! `TigerStyle`: Abstract interface for table-shaped storage.
//!
//! Both executors implement this contract, so the CRUD facade and every
//! domain caller are backend-agnostic. All operations are async and return
//! explicit errors.

use async_trait::async_trait;

use super::error::StorageResult;
use crate::condition::Condition;
use crate::record::{Record, RowSet};
use crate::schema::TableName;

/// Abstract table-shaped storage.
///
/// Implementations must honor the shared schema vocabulary: the same logical
/// tables, columns, and defaults regardless of substrate.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Create tables and indexes where the substrate has such notions.
    ///
    /// Idempotent: calling N times equals calling once. A pure no-op on the
    /// key-value substrate, where tables exist implicitly via key prefixes.
    async fn ensure_schema(&self) -> StorageResult<()>;

    /// Insert a row, filling schema defaults and minting an id when absent.
    ///
    /// Returns the row's unique identifier, usable for later update/delete.
    async fn insert(&self, table: TableName, record: Record) -> StorageResult<String>;

    /// Select rows matching the condition.
    ///
    /// [`Condition::Unsupported`] returns an empty row set rather than
    /// erroring or matching everything.
    async fn select(&self, table: TableName, condition: &Condition) -> StorageResult<RowSet>;

    /// Merge `changes` into every matching row in place.
    ///
    /// Row identity is preserved; `id` in `changes` is ignored. Returns the
    /// affected-row count.
    async fn update(
        &self,
        table: TableName,
        condition: &Condition,
        changes: Record,
    ) -> StorageResult<u64>;

    /// Delete every matching row, returning the affected-row count.
    ///
    /// The match-all condition clears the whole table.
    async fn delete(&self, table: TableName, condition: &Condition) -> StorageResult<u64>;
}
