//! Vita Database - CRUD Facade
//!
//! `TigerStyle`: One public surface, backend decided once, uniform results.
//!
//! # Overview
//!
//! [`Database`] is the single entry point every domain store talks to. At
//! construction it detects whether the embedded relational engine is usable
//! and dispatches every call to either the native executor or the fallback
//! record store; callers observe identical results either way.
//!
//! # Example
//!
//! ```rust
//! use vita_store::{Database, DatabaseConfig, Supplement};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), vita_store::StorageError> {
//! let db = Database::connect(DatabaseConfig::default().without_demo_data()).await?;
//! db.initialize().await?;
//!
//! let id = db
//!     .save_supplement(&Supplement::new("u1", "Vitamin D3", "2000 IU", "08:00"))
//!     .await?;
//! let supplements = db.supplements("u1").await?;
//! assert_eq!(supplements.len(), 1);
//! assert!(!supplements[0].taken);
//!
//! db.set_supplement_taken(&id, true).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod models;
mod seed;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::condition::Condition;
use crate::record::{Record, RowSet, Value};
use crate::schema::TableName;
use crate::storage::{FallbackStore, FileKv, KeyValueStore, MemoryKv, StorageBackend};
use crate::storage::{StorageError, StorageResult};

#[cfg(feature = "native")]
use crate::storage::NativeExecutor;

pub use config::DatabaseConfig;
pub use models::{
    NutritionEntry, NutritionGoals, ProgressEntry, Recipe, Reminder, Supplement, User,
    UserSettings, WaterIntake, Workout, WorkoutExercise,
};

// =============================================================================
// BackendMode
// =============================================================================

/// Which storage substrate a [`Database`] ended up on.
///
/// Decided once per instance; the underlying platform capability cannot
/// change at runtime, so there is no re-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Embedded relational engine
    Native,
    /// Key-value emulation
    Fallback,
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// The persistence facade.
///
/// Explicitly constructed and passed around (no process-global handle), so
/// tests can hold independent instances over independent substrates.
#[derive(Debug)]
pub struct Database {
    backend: Box<dyn StorageBackend>,
    mode: BackendMode,
    config: DatabaseConfig,
    initialized: AtomicBool,
}

impl Database {
    /// Detect the best available backend and connect to it.
    ///
    /// Tries the native engine first when built with the `native` feature
    /// and the config allows it. Any failure to open the engine is an
    /// expected runtime condition, logged and resolved into fallback mode,
    /// never propagated.
    ///
    /// # Errors
    /// Returns an error only if the fallback substrate itself cannot be
    /// opened (e.g. the storage directory is not writable).
    pub async fn connect(config: DatabaseConfig) -> StorageResult<Self> {
        #[cfg(feature = "native")]
        if config.prefer_native {
            match NativeExecutor::open(&config.native_url()).await {
                Ok(executor) => {
                    tracing::info!(mode = %BackendMode::Native, "storage backend selected");
                    return Ok(Self::with_backend(
                        Box::new(executor),
                        BackendMode::Native,
                        config,
                    ));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "native engine unavailable, using fallback store");
                }
            }
        }

        let kv: Arc<dyn KeyValueStore> = match config.kv_dir() {
            Some(dir) => Arc::new(FileKv::open(dir).await?),
            None => Arc::new(MemoryKv::new()),
        };
        tracing::info!(mode = %BackendMode::Fallback, "storage backend selected");
        Ok(Self::with_backend(
            Box::new(FallbackStore::new(kv)),
            BackendMode::Fallback,
            config,
        ))
    }

    /// Wrap an already-constructed backend (dependency injection for tests).
    #[must_use]
    pub fn with_backend(
        backend: Box<dyn StorageBackend>,
        mode: BackendMode,
        config: DatabaseConfig,
    ) -> Self {
        Self {
            backend,
            mode,
            config,
            initialized: AtomicBool::new(false),
        }
    }

    /// Which substrate this instance runs on.
    #[must_use]
    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    /// Prepare the store for use: create schema and, on the fallback path,
    /// seed demo rows for the well-known demo identity.
    ///
    /// Idempotent once it has succeeded; repeated calls return immediately.
    /// A failed attempt clears the guard so the next call retries the whole
    /// sequence instead of reporting success over a missing schema. The
    /// fallback substrate has no "already seeded" marker, so seeding is
    /// guarded only by this in-memory flag plus a check for the demo
    /// identity itself.
    ///
    /// # Errors
    /// Propagates schema or seeding failures.
    pub async fn initialize(&self) -> StorageResult<()> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        let result = self.initialize_inner().await;
        if result.is_err() {
            self.initialized.store(false, Ordering::SeqCst);
        }
        result
    }

    async fn initialize_inner(&self) -> StorageResult<()> {
        self.backend.ensure_schema().await?;

        if self.mode == BackendMode::Fallback && self.config.seed_demo_data {
            seed::seed_demo(self).await?;
        }
        Ok(())
    }

    // =========================================================================
    // Generic CRUD
    // =========================================================================

    /// Insert a row, returning its generated-or-assigned identifier.
    ///
    /// # Errors
    /// [`StorageError::Constraint`] on a unique-key duplicate (native path),
    /// otherwise storage failures.
    pub async fn insert_data(&self, table: TableName, record: Record) -> StorageResult<String> {
        self.backend.insert(table, record).await
    }

    /// Select rows matching a typed condition.
    ///
    /// # Errors
    /// Propagates storage failures; an unsupported condition is not an
    /// error, it matches nothing.
    pub async fn select_data(
        &self,
        table: TableName,
        condition: &Condition,
    ) -> StorageResult<RowSet> {
        self.backend.select(table, condition).await
    }

    /// Select using the textual condition grammar with positional params.
    ///
    /// Compatibility adapter at the boundary: the string is parsed into the
    /// typed condition, so anything outside the grammar matches nothing.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn select_data_raw(
        &self,
        table: TableName,
        condition: &str,
        params: &[Value],
    ) -> StorageResult<RowSet> {
        self.backend
            .select(table, &Condition::parse(condition, params))
            .await
    }

    /// Update using the textual condition grammar with positional params.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn update_data_raw(
        &self,
        table: TableName,
        condition: &str,
        params: &[Value],
        changes: Record,
    ) -> StorageResult<u64> {
        self.backend
            .update(table, &Condition::parse(condition, params), changes)
            .await
    }

    /// Delete using the textual condition grammar with positional params.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn delete_data_raw(
        &self,
        table: TableName,
        condition: &str,
        params: &[Value],
    ) -> StorageResult<u64> {
        self.backend
            .delete(table, &Condition::parse(condition, params))
            .await
    }

    /// Merge changes into every matching row, returning the affected count.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn update_data(
        &self,
        table: TableName,
        condition: &Condition,
        changes: Record,
    ) -> StorageResult<u64> {
        self.backend.update(table, condition, changes).await
    }

    /// Delete every matching row, returning the affected count.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn delete_data(&self, table: TableName, condition: &Condition) -> StorageResult<u64> {
        self.backend.delete(table, condition).await
    }

    // =========================================================================
    // Upsert
    // =========================================================================

    /// Insert-or-update keyed by a unique column.
    ///
    /// On the native path: attempt the insert and convert a constraint
    /// violation into an update. The fallback substrate never raises a
    /// uniqueness error, so there the existence check is explicit before
    /// deciding insert vs. update. Both paths end with exactly one row for
    /// the unique value.
    async fn upsert(
        &self,
        table: TableName,
        unique_column: &str,
        unique_value: &str,
        record: Record,
    ) -> StorageResult<String> {
        let by_key = Condition::eq(unique_column, unique_value);

        match self.mode {
            BackendMode::Native => match self.backend.insert(table, record.clone()).await {
                Ok(id) => Ok(id),
                Err(e) if e.is_constraint() => {
                    self.backend.update(table, &by_key, record).await?;
                    self.existing_id(table, &by_key).await
                }
                Err(e) => Err(e),
            },
            BackendMode::Fallback => {
                if self.backend.select(table, &by_key).await?.is_empty() {
                    self.backend.insert(table, record).await
                } else {
                    self.backend.update(table, &by_key, record).await?;
                    self.existing_id(table, &by_key).await
                }
            }
        }
    }

    async fn existing_id(&self, table: TableName, condition: &Condition) -> StorageResult<String> {
        self.backend
            .select(table, condition)
            .await?
            .first()
            .and_then(|row| row.get("id"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| StorageError::query("upsert target row disappeared"))
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Save a user, upserting by email. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_user(&self, user: &User) -> StorageResult<String> {
        let record = models::to_record(user)?;
        self.upsert(TableName::Users, "email", &user.email, record)
            .await
    }

    /// Look up a user by email. `None` when absent.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let rows = self
            .backend
            .select(TableName::Users, &Condition::eq("email", email))
            .await?;
        rows.first().map(models::from_record).transpose()
    }

    // =========================================================================
    // Nutrition
    // =========================================================================

    /// Log a food entry. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_nutrition_entry(&self, entry: &NutritionEntry) -> StorageResult<String> {
        self.backend
            .insert(TableName::NutritionEntries, models::to_record(entry)?)
            .await
    }

    /// All food entries for a user.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn nutrition_entries(&self, user_id: &str) -> StorageResult<Vec<NutritionEntry>> {
        self.select_models(TableName::NutritionEntries, &Condition::eq("user_id", user_id))
            .await
    }

    /// Delete a food entry by id. Returns whether a row was removed.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn delete_nutrition_entry(&self, id: &str) -> StorageResult<bool> {
        let removed = self
            .backend
            .delete(TableName::NutritionEntries, &Condition::eq("id", id))
            .await?;
        Ok(removed > 0)
    }

    /// Log a water intake. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_water_intake(&self, intake: &WaterIntake) -> StorageResult<String> {
        self.backend
            .insert(TableName::WaterIntake, models::to_record(intake)?)
            .await
    }

    /// All water intakes for a user.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn water_intake(&self, user_id: &str) -> StorageResult<Vec<WaterIntake>> {
        self.select_models(TableName::WaterIntake, &Condition::eq("user_id", user_id))
            .await
    }

    // =========================================================================
    // Workouts
    // =========================================================================

    /// Save a workout session. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_workout(&self, workout: &Workout) -> StorageResult<String> {
        self.backend
            .insert(TableName::Workouts, models::to_record(workout)?)
            .await
    }

    /// All workouts for a user.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn workouts(&self, user_id: &str) -> StorageResult<Vec<Workout>> {
        self.select_models(TableName::Workouts, &Condition::eq("user_id", user_id))
            .await
    }

    /// Add an exercise to a workout. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_workout_exercise(
        &self,
        exercise: &WorkoutExercise,
    ) -> StorageResult<String> {
        self.backend
            .insert(TableName::WorkoutExercises, models::to_record(exercise)?)
            .await
    }

    /// Exercises belonging to a workout, ordered by position.
    ///
    /// Ordering is post-processed in memory; the condition grammar has no
    /// ORDER BY.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn workout_exercises(
        &self,
        workout_id: &str,
    ) -> StorageResult<Vec<WorkoutExercise>> {
        let mut exercises: Vec<WorkoutExercise> = self
            .select_models(
                TableName::WorkoutExercises,
                &Condition::eq("workout_id", workout_id),
            )
            .await?;
        exercises.sort_by_key(|e| e.position);
        Ok(exercises)
    }

    /// Delete a workout and its exercises.
    ///
    /// The substrate cannot cascade, so the children are deleted explicitly
    /// first. Returns whether the workout row itself was removed.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn delete_workout(&self, workout_id: &str) -> StorageResult<bool> {
        self.backend
            .delete(
                TableName::WorkoutExercises,
                &Condition::eq("workout_id", workout_id),
            )
            .await?;
        let removed = self
            .backend
            .delete(TableName::Workouts, &Condition::eq("id", workout_id))
            .await?;
        Ok(removed > 0)
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Record a progress snapshot. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_progress_entry(&self, entry: &ProgressEntry) -> StorageResult<String> {
        self.backend
            .insert(TableName::ProgressEntries, models::to_record(entry)?)
            .await
    }

    /// All progress snapshots for a user.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn progress_entries(&self, user_id: &str) -> StorageResult<Vec<ProgressEntry>> {
        self.select_models(TableName::ProgressEntries, &Condition::eq("user_id", user_id))
            .await
    }

    // =========================================================================
    // Recipes
    // =========================================================================

    /// Save a recipe. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_recipe(&self, recipe: &Recipe) -> StorageResult<String> {
        self.backend
            .insert(TableName::Recipes, models::to_record(recipe)?)
            .await
    }

    /// All recipes for a user.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn recipes(&self, user_id: &str) -> StorageResult<Vec<Recipe>> {
        self.select_models(TableName::Recipes, &Condition::eq("user_id", user_id))
            .await
    }

    /// Delete a recipe by id. Returns whether a row was removed.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn delete_recipe(&self, id: &str) -> StorageResult<bool> {
        let removed = self
            .backend
            .delete(TableName::Recipes, &Condition::eq("id", id))
            .await?;
        Ok(removed > 0)
    }

    // =========================================================================
    // Reminders
    // =========================================================================

    /// Save a reminder. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_reminder(&self, reminder: &Reminder) -> StorageResult<String> {
        self.backend
            .insert(TableName::Reminders, models::to_record(reminder)?)
            .await
    }

    /// All reminders for a user.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn reminders(&self, user_id: &str) -> StorageResult<Vec<Reminder>> {
        self.select_models(TableName::Reminders, &Condition::eq("user_id", user_id))
            .await
    }

    /// Enable or disable a reminder. Returns whether a row was touched.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn set_reminder_enabled(&self, id: &str, enabled: bool) -> StorageResult<bool> {
        let affected = self
            .backend
            .update(
                TableName::Reminders,
                &Condition::eq("id", id),
                Record::new().with("enabled", enabled),
            )
            .await?;
        Ok(affected > 0)
    }

    /// Delete a reminder by id. Returns whether a row was removed.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn delete_reminder(&self, id: &str) -> StorageResult<bool> {
        let removed = self
            .backend
            .delete(TableName::Reminders, &Condition::eq("id", id))
            .await?;
        Ok(removed > 0)
    }

    // =========================================================================
    // Supplements
    // =========================================================================

    /// Save a supplement entry. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_supplement(&self, supplement: &Supplement) -> StorageResult<String> {
        self.backend
            .insert(TableName::Supplements, models::to_record(supplement)?)
            .await
    }

    /// All supplements for a user.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn supplements(&self, user_id: &str) -> StorageResult<Vec<Supplement>> {
        self.select_models(TableName::Supplements, &Condition::eq("user_id", user_id))
            .await
    }

    /// Mark a supplement taken or not. Returns whether a row was touched.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn set_supplement_taken(&self, id: &str, taken: bool) -> StorageResult<bool> {
        let affected = self
            .backend
            .update(
                TableName::Supplements,
                &Condition::eq("id", id),
                Record::new().with("taken", taken),
            )
            .await?;
        Ok(affected > 0)
    }

    /// Delete a supplement by id. Returns whether a row was removed.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn delete_supplement(&self, id: &str) -> StorageResult<bool> {
        let removed = self
            .backend
            .delete(TableName::Supplements, &Condition::eq("id", id))
            .await?;
        Ok(removed > 0)
    }

    // =========================================================================
    // Goals and Settings
    // =========================================================================

    /// Save nutrition targets, upserting by user. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_goals(&self, goals: &NutritionGoals) -> StorageResult<String> {
        let record = models::to_record(goals)?;
        self.upsert(TableName::NutritionGoals, "user_id", &goals.user_id, record)
            .await
    }

    /// Nutrition targets for a user. `None` when never saved.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn goals(&self, user_id: &str) -> StorageResult<Option<NutritionGoals>> {
        let rows = self
            .backend
            .select(TableName::NutritionGoals, &Condition::eq("user_id", user_id))
            .await?;
        rows.first().map(models::from_record).transpose()
    }

    /// Save application settings, upserting by user. Returns the row id.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn save_settings(&self, settings: &UserSettings) -> StorageResult<String> {
        let record = models::to_record(settings)?;
        self.upsert(TableName::UserSettings, "user_id", &settings.user_id, record)
            .await
    }

    /// Application settings for a user. `None` when never saved.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn settings(&self, user_id: &str) -> StorageResult<Option<UserSettings>> {
        let rows = self
            .backend
            .select(TableName::UserSettings, &Condition::eq("user_id", user_id))
            .await?;
        rows.first().map(models::from_record).transpose()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn select_models<T: serde::de::DeserializeOwned>(
        &self,
        table: TableName,
        condition: &Condition,
    ) -> StorageResult<Vec<T>> {
        let rows = self.backend.select(table, condition).await?;
        rows.rows().iter().map(models::from_record).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Fallback store whose schema creation fails on the first attempt.
    #[derive(Debug)]
    struct FlakySchemaBackend {
        inner: FallbackStore,
        fail_next: AtomicBool,
    }

    impl FlakySchemaBackend {
        fn new() -> Self {
            Self {
                inner: FallbackStore::new(Arc::new(MemoryKv::new())),
                fail_next: AtomicBool::new(true),
            }
        }
    }

    #[async_trait]
    impl StorageBackend for FlakySchemaBackend {
        async fn ensure_schema(&self) -> StorageResult<()> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(StorageError::connection("schema creation interrupted"));
            }
            self.inner.ensure_schema().await
        }

        async fn insert(&self, table: TableName, record: Record) -> StorageResult<String> {
            self.inner.insert(table, record).await
        }

        async fn select(&self, table: TableName, condition: &Condition) -> StorageResult<RowSet> {
            self.inner.select(table, condition).await
        }

        async fn update(
            &self,
            table: TableName,
            condition: &Condition,
            changes: Record,
        ) -> StorageResult<u64> {
            self.inner.update(table, condition, changes).await
        }

        async fn delete(&self, table: TableName, condition: &Condition) -> StorageResult<u64> {
            self.inner.delete(table, condition).await
        }
    }

    fn fallback_db() -> Database {
        Database::with_backend(
            Box::new(FallbackStore::new(Arc::new(MemoryKv::new()))),
            BackendMode::Fallback,
            DatabaseConfig::default().without_demo_data(),
        )
    }

    #[test]
    fn test_backend_mode_display() {
        assert_eq!(BackendMode::Native.to_string(), "native");
        assert_eq!(BackendMode::Fallback.to_string(), "fallback");
    }

    #[tokio::test]
    async fn test_connect_without_native_uses_fallback() {
        let db = Database::connect(DatabaseConfig::default().without_native())
            .await
            .unwrap();
        assert_eq!(db.mode(), BackendMode::Fallback);
    }

    #[tokio::test]
    async fn test_initialize_is_reentrant() {
        let db = fallback_db();
        db.initialize().await.unwrap();
        db.initialize().await.unwrap();
    }

    #[tokio::test]
    async fn test_initialize_retries_after_failure() {
        let db = Database::with_backend(
            Box::new(FlakySchemaBackend::new()),
            BackendMode::Fallback,
            DatabaseConfig::default().without_demo_data(),
        );

        // First attempt fails; the guard must not absorb the error.
        assert!(db.initialize().await.is_err());

        // Retry runs the whole sequence again and succeeds.
        db.initialize().await.unwrap();

        // The store is actually usable afterwards.
        let id = db
            .save_supplement(&Supplement::new("u1", "Zinc", "25 mg", "09:00"))
            .await
            .unwrap();
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_raw_update_and_delete_respect_grammar() {
        let db = fallback_db();
        db.initialize().await.unwrap();

        db.save_supplement(&Supplement::new("u1", "Zinc", "25 mg", "09:00"))
            .await
            .unwrap();

        // Outside the grammar: touches nothing.
        let affected = db
            .update_data_raw(
                TableName::Supplements,
                "user_id = ? OR name = ?",
                &[Value::from("u1"), Value::from("Zinc")],
                Record::new().with("taken", true),
            )
            .await
            .unwrap();
        assert_eq!(affected, 0);

        let affected = db
            .update_data_raw(
                TableName::Supplements,
                "user_id = ?",
                &[Value::from("u1")],
                Record::new().with("taken", true),
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let removed = db
            .delete_data_raw(TableName::Supplements, "1=1", &[])
            .await
            .unwrap();
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn test_upsert_returns_stable_id_on_fallback() {
        let db = fallback_db();
        db.initialize().await.unwrap();

        let first = db
            .save_user(&User::new("x@example.com", "X"))
            .await
            .unwrap();
        let second = db
            .save_user(&User::new("x@example.com", "X2"))
            .await
            .unwrap();
        assert_eq!(first, second);
    }
}
