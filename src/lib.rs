//! # Vita Store
//!
//! An offline-first persistence layer for a personal health tracker, with
//! transparent backend selection.
//!
//! ## Features
//!
//! - **One CRUD contract**: insert, select, update, and delete behave
//!   identically regardless of which substrate holds the data
//! - **Native engine**: an embedded relational database (`SQLite` via
//!   `sqlx`) behind the `native` feature flag
//! - **Fallback store**: key-value emulation of tables for platforms
//!   without the engine, in memory or on disk
//! - **Typed domain API**: users, nutrition, workouts, progress, recipes,
//!   reminders, supplements, goals, settings
//! - **Schema as source of truth**: defaults, type coercion, and
//!   identifiers come from one declarative schema on both paths
//!
//! ## Quick Start
//!
//! ```rust
//! use vita_store::{Database, DatabaseConfig, User};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), vita_store::StorageError> {
//! let db = Database::connect(DatabaseConfig::default()).await?;
//! db.initialize().await?;
//!
//! db.save_user(&User::new("demo@vita.app", "Demo")).await?;
//! let user = db.user_by_email("demo@vita.app").await?;
//! assert!(user.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Database (facade)                     │
//! │  typed domain API  │  generic CRUD  │  upsert helpers   │
//! ├────────────────────┴────────────────┴───────────────────┤
//! │                StorageBackend (trait)                    │
//! ├───────────────────────────┬─────────────────────────────┤
//! │  NativeExecutor           │  FallbackStore              │
//! │  SQLite pool, real SQL    │  table emulation over KV    │
//! │                           │  MemoryKv / FileKv          │
//! ├───────────────────────────┴─────────────────────────────┤
//! │     Schema module: tables, columns, normalization       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Feature Flags
//!
//! - `native` (default) - embedded relational engine via `sqlx`/`SQLite`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod condition;
pub mod constants;
pub mod record;
pub mod schema;
pub mod storage;
pub mod vita;

// Re-export common types
pub use condition::{Condition, EqualityPair};
pub use constants::*;
pub use record::{generate_row_id, Record, RowSet, Value};
pub use schema::{table, tables, ColumnDef, ColumnType, TableDef, TableName};
pub use storage::{
    FallbackStore, FileKv, KeyValueStore, MemoryKv, StorageBackend, StorageError, StorageResult,
};

#[cfg(feature = "native")]
pub use storage::NativeExecutor;

// Facade exports (main API)
pub use vita::{
    BackendMode, Database, DatabaseConfig, NutritionEntry, NutritionGoals, ProgressEntry, Recipe,
    Reminder, Supplement, User, UserSettings, WaterIntake, Workout, WorkoutExercise,
};
