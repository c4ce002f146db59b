//! Schema Manager - Logical Tables Shared by Both Backends
//!
//! `TigerStyle`: One source of truth, identical vocabulary everywhere.
//!
//! The fixed set of logical tables and their columns is declared once here
//! and honored identically by the native executor (which turns it into DDL)
//! and the fallback record store (which uses it to default absent fields and
//! coerce values read back from the key-value namespace).

use std::fmt;
use std::sync::OnceLock;

use crate::record::{generate_row_id, Record, Value};

// =============================================================================
// TableName
// =============================================================================

/// The fixed vocabulary of logical tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    /// Account records, one per identity
    Users,
    /// Logged food entries
    NutritionEntries,
    /// Logged water amounts
    WaterIntake,
    /// Workout sessions
    Workouts,
    /// Exercises belonging to a workout (`workout_id` foreign reference)
    WorkoutExercises,
    /// Body measurements over time
    ProgressEntries,
    /// Saved recipes
    Recipes,
    /// Scheduled reminders
    Reminders,
    /// Supplement schedule and intake state
    Supplements,
    /// Per-user nutrition targets
    NutritionGoals,
    /// Per-user application settings
    UserSettings,
}

impl TableName {
    /// Get string representation (also the key-namespace prefix).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::NutritionEntries => "nutrition_entries",
            Self::WaterIntake => "water_intake",
            Self::Workouts => "workouts",
            Self::WorkoutExercises => "workout_exercises",
            Self::ProgressEntries => "progress_entries",
            Self::Recipes => "recipes",
            Self::Reminders => "reminders",
            Self::Supplements => "supplements",
            Self::NutritionGoals => "nutrition_goals",
            Self::UserSettings => "user_settings",
        }
    }

    /// Parse from string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "users" => Some(Self::Users),
            "nutrition_entries" => Some(Self::NutritionEntries),
            "water_intake" => Some(Self::WaterIntake),
            "workouts" => Some(Self::Workouts),
            "workout_exercises" => Some(Self::WorkoutExercises),
            "progress_entries" => Some(Self::ProgressEntries),
            "recipes" => Some(Self::Recipes),
            "reminders" => Some(Self::Reminders),
            "supplements" => Some(Self::Supplements),
            "nutrition_goals" => Some(Self::NutritionGoals),
            "user_settings" => Some(Self::UserSettings),
            _ => None,
        }
    }

    /// All logical tables in declaration order.
    #[must_use]
    pub fn all() -> &'static [TableName] {
        &[
            Self::Users,
            Self::NutritionEntries,
            Self::WaterIntake,
            Self::Workouts,
            Self::WorkoutExercises,
            Self::ProgressEntries,
            Self::Recipes,
            Self::Reminders,
            Self::Supplements,
            Self::NutritionGoals,
            Self::UserSettings,
        ]
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Columns
// =============================================================================

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// UTF-8 text
    Text,
    /// 64-bit integer
    Integer,
    /// 64-bit float
    Real,
    /// Boolean, stored as integer 0/1 on the relational engine
    Boolean,
    /// Nested JSON, stored as text on the relational engine
    Json,
    /// RFC 3339 timestamp, stored as text
    Timestamp,
}

impl ColumnType {
    /// SQL storage type for the native path.
    #[must_use]
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Text | Self::Json | Self::Timestamp => "TEXT",
            Self::Integer | Self::Boolean => "INTEGER",
            Self::Real => "REAL",
        }
    }
}

/// One column of a logical table.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Column name
    pub name: &'static str,
    /// Semantic type
    pub column_type: ColumnType,
    /// Default applied when a caller omits the column
    pub default: Option<Value>,
    /// Whether the native path enforces uniqueness
    pub unique: bool,
    /// Whether the native path creates a secondary index
    pub indexed: bool,
}

impl ColumnDef {
    fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            default: None,
            unique: false,
            indexed: false,
        }
    }

    /// Text column.
    #[must_use]
    pub fn text(name: &'static str) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Integer column.
    #[must_use]
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    /// Real column.
    #[must_use]
    pub fn real(name: &'static str) -> Self {
        Self::new(name, ColumnType::Real)
    }

    /// Boolean column.
    #[must_use]
    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, ColumnType::Boolean)
    }

    /// JSON blob column.
    #[must_use]
    pub fn json(name: &'static str) -> Self {
        Self::new(name, ColumnType::Json)
    }

    /// Timestamp column.
    #[must_use]
    pub fn timestamp(name: &'static str) -> Self {
        Self::new(name, ColumnType::Timestamp)
    }

    /// Set the declared default.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark unique (enforced by the native engine only; advisory on the
    /// fallback path, where the facade checks existence explicitly).
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark indexed on the native path.
    #[must_use]
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Coerce a stored value into this column's semantic type.
    ///
    /// The key-value substrate and the relational engine encode booleans and
    /// JSON differently; reads are normalized through here so callers see one
    /// shape.
    #[must_use]
    pub fn coerce(&self, value: Value) -> Value {
        match (self.column_type, value) {
            (ColumnType::Boolean, Value::Integer(i)) => Value::Boolean(i != 0),
            #[allow(clippy::cast_precision_loss)]
            (ColumnType::Real, Value::Integer(i)) => Value::Real(i as f64),
            (ColumnType::Json, Value::Text(s)) => serde_json::from_str(&s)
                .map_or_else(|_| Value::Text(s), Value::Json),
            (_, value) => value,
        }
    }
}

// =============================================================================
// TableDef
// =============================================================================

/// A logical table: name plus ordered column list.
#[derive(Debug, Clone)]
pub struct TableDef {
    /// Table name
    pub name: TableName,
    /// Ordered columns; `id` is always first and is the primary key
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    fn new(name: TableName, mut columns: Vec<ColumnDef>) -> Self {
        columns.insert(0, ColumnDef::text("id"));
        Self { name, columns }
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// `CREATE TABLE IF NOT EXISTS` DDL for the native path.
    #[must_use]
    pub fn sql_create(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|col| {
                if col.name == "id" {
                    "id TEXT PRIMARY KEY".to_string()
                } else if col.unique {
                    format!("{} {} UNIQUE", col.name, col.column_type.sql_type())
                } else {
                    format!("{} {}", col.name, col.column_type.sql_type())
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name.as_str(),
            columns
        )
    }

    /// `CREATE INDEX IF NOT EXISTS` statements for the native path.
    #[must_use]
    pub fn sql_indexes(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|col| col.indexed)
            .map(|col| {
                format!(
                    "CREATE INDEX IF NOT EXISTS idx_{table}_{col} ON {table}({col})",
                    table = self.name.as_str(),
                    col = col.name,
                )
            })
            .collect()
    }

    /// Prepare a caller-supplied record for insert.
    ///
    /// Ensures row identity (generating a synthetic id when absent), fills
    /// declared defaults for omitted columns, and drops columns that are not
    /// part of this table. The result has the same shape on both backends.
    #[must_use]
    pub fn normalize_insert(&self, record: Record) -> Record {
        let mut normalized = Record::new();

        let id = record
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(generate_row_id, ToString::to_string);
        normalized.set("id", id);

        for col in &self.columns {
            if col.name == "id" {
                continue;
            }
            match record.get(col.name) {
                Some(value) if !value.is_null() => {
                    normalized.set(col.name, col.coerce(value.clone()));
                }
                _ => {
                    if let Some(default) = &col.default {
                        normalized.set(col.name, default.clone());
                    }
                }
            }
        }

        normalized
    }

    /// Prepare a caller-supplied change set for update.
    ///
    /// Drops unknown columns and strips `id`: row identity is never re-keyed
    /// by an update.
    #[must_use]
    pub fn normalize_update(&self, changes: Record) -> Record {
        let mut normalized = Record::new();
        for col in &self.columns {
            if col.name == "id" {
                continue;
            }
            if let Some(value) = changes.get(col.name) {
                if !value.is_null() {
                    normalized.set(col.name, col.coerce(value.clone()));
                }
            }
        }
        normalized
    }

    /// Normalize a record read back from storage.
    ///
    /// Coerces each stored value to its declared type and fills declared
    /// defaults for columns missing from the stored form, so records have a
    /// consistent shape regardless of which fields the writer supplied.
    #[must_use]
    pub fn normalize_read(&self, record: Record) -> Record {
        let mut normalized = Record::new();

        if let Some(id) = record.get("id") {
            normalized.set("id", id.clone());
        }

        for col in &self.columns {
            if col.name == "id" {
                continue;
            }
            match record.get(col.name) {
                Some(value) if !value.is_null() => {
                    normalized.set(col.name, col.coerce(value.clone()));
                }
                _ => {
                    if let Some(default) = &col.default {
                        normalized.set(col.name, default.clone());
                    }
                }
            }
        }

        normalized
    }
}

// =============================================================================
// Schema
// =============================================================================

static SCHEMA: OnceLock<Vec<TableDef>> = OnceLock::new();

/// All declared logical tables.
#[must_use]
pub fn tables() -> &'static [TableDef] {
    SCHEMA.get_or_init(build_schema).as_slice()
}

/// Definition of a single logical table.
///
/// # Panics
/// Never in practice: every `TableName` variant is declared in the schema.
#[must_use]
pub fn table(name: TableName) -> &'static TableDef {
    tables()
        .iter()
        .find(|def| def.name == name)
        .expect("every logical table is declared")
}

fn build_schema() -> Vec<TableDef> {
    let schema = vec![
        TableDef::new(
            TableName::Users,
            vec![
                ColumnDef::text("email").unique(),
                ColumnDef::text("name"),
                ColumnDef::integer("age"),
                ColumnDef::real("weight_kg"),
                ColumnDef::real("height_cm"),
                ColumnDef::timestamp("created_at"),
            ],
        ),
        TableDef::new(
            TableName::NutritionEntries,
            vec![
                ColumnDef::text("user_id").indexed(),
                ColumnDef::text("name"),
                ColumnDef::real("calories").with_default(0.0),
                ColumnDef::real("protein_g").with_default(0.0),
                ColumnDef::real("carbs_g").with_default(0.0),
                ColumnDef::real("fat_g").with_default(0.0),
                ColumnDef::text("meal_type"),
                ColumnDef::timestamp("logged_at"),
            ],
        ),
        TableDef::new(
            TableName::WaterIntake,
            vec![
                ColumnDef::text("user_id").indexed(),
                ColumnDef::integer("amount_ml").with_default(0_i64),
                ColumnDef::timestamp("logged_at"),
            ],
        ),
        TableDef::new(
            TableName::Workouts,
            vec![
                ColumnDef::text("user_id").indexed(),
                ColumnDef::text("name"),
                ColumnDef::text("notes").with_default(""),
                ColumnDef::integer("duration_min").with_default(0_i64),
                ColumnDef::boolean("completed").with_default(false),
                ColumnDef::timestamp("performed_at"),
            ],
        ),
        TableDef::new(
            TableName::WorkoutExercises,
            vec![
                ColumnDef::text("workout_id").indexed(),
                ColumnDef::text("name"),
                ColumnDef::integer("sets").with_default(3_i64),
                ColumnDef::integer("reps").with_default(10_i64),
                ColumnDef::real("weight_kg").with_default(0.0),
                ColumnDef::integer("position").with_default(0_i64),
            ],
        ),
        TableDef::new(
            TableName::ProgressEntries,
            vec![
                ColumnDef::text("user_id").indexed(),
                ColumnDef::real("weight_kg"),
                ColumnDef::real("body_fat_pct"),
                ColumnDef::json("measurements").with_default(serde_json::json!({})),
                ColumnDef::text("photo_uri"),
                ColumnDef::timestamp("recorded_at"),
            ],
        ),
        TableDef::new(
            TableName::Recipes,
            vec![
                ColumnDef::text("user_id").indexed(),
                ColumnDef::text("name"),
                ColumnDef::json("ingredients").with_default(serde_json::json!([])),
                ColumnDef::text("instructions").with_default(""),
                ColumnDef::real("calories").with_default(0.0),
                ColumnDef::integer("servings").with_default(1_i64),
                ColumnDef::json("tags").with_default(serde_json::json!([])),
            ],
        ),
        TableDef::new(
            TableName::Reminders,
            vec![
                ColumnDef::text("user_id").indexed(),
                ColumnDef::text("title"),
                ColumnDef::text("time").with_default(""),
                ColumnDef::json("days").with_default(serde_json::json!([])),
                ColumnDef::boolean("enabled").with_default(true),
                ColumnDef::text("kind").with_default("general"),
            ],
        ),
        TableDef::new(
            TableName::Supplements,
            vec![
                ColumnDef::text("user_id").indexed(),
                ColumnDef::text("name"),
                ColumnDef::text("dose").with_default(""),
                ColumnDef::text("time").with_default(""),
                ColumnDef::boolean("taken").with_default(false),
                ColumnDef::json("completed_dates").with_default(serde_json::json!([])),
            ],
        ),
        TableDef::new(
            TableName::NutritionGoals,
            vec![
                ColumnDef::text("user_id").unique().indexed(),
                ColumnDef::real("calories_target").with_default(2000.0),
                ColumnDef::real("protein_target_g").with_default(150.0),
                ColumnDef::real("carbs_target_g").with_default(250.0),
                ColumnDef::real("fat_target_g").with_default(70.0),
                ColumnDef::integer("water_target_ml").with_default(2000_i64),
            ],
        ),
        TableDef::new(
            TableName::UserSettings,
            vec![
                ColumnDef::text("user_id").unique().indexed(),
                ColumnDef::text("theme").with_default("system"),
                ColumnDef::text("units").with_default("metric"),
                ColumnDef::boolean("notifications_enabled").with_default(true),
            ],
        ),
    ];

    // Postcondition: one definition per TableName variant.
    assert_eq!(schema.len(), crate::constants::SCHEMA_TABLES_COUNT);
    schema
}

// =============================================================================
// Tests
// =============================================================================
