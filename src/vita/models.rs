//! Domain Models - One Concrete Type per Logical Table
//!
//! `TigerStyle`: Explicit optional fields, one normalization path.
//!
//! Every model converts to and from the generic [`Record`] through serde,
//! then through the schema's normalization, so nested JSON fields (tags,
//! days, measurements) and boolean coercion behave identically on both
//! backends. `id` is `None` until the store mints a row identity.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::storage::{StorageError, StorageResult};

// =============================================================================
// Conversions
// =============================================================================

/// Serialize a model into a generic record.
pub(crate) fn to_record<T: Serialize>(model: &T) -> StorageResult<Record> {
    let json = serde_json::to_value(model)
        .map_err(|e| StorageError::serialization(e.to_string()))?;
    Record::from_json_value(json)
        .ok_or_else(|| StorageError::serialization("model did not serialize to an object"))
}

/// Deserialize a model from a generic record.
pub(crate) fn from_record<T: DeserializeOwned>(record: &Record) -> StorageResult<T> {
    serde_json::from_value(record.to_json_value())
        .map_err(|e| StorageError::serialization(e.to_string()))
}

// =============================================================================
// Models
// =============================================================================

/// An account, one per identity. `email` is the unique key used by upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unique email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    /// Body weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// When the account was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a user with the current timestamp.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            name: name.into(),
            age: None,
            weight_kg: None,
            height_cm: None,
            created_at: Some(Utc::now()),
        }
    }
}

/// A logged food entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEntry {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user
    pub user_id: String,
    /// Food name
    pub name: String,
    /// Calories
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs_g: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat_g: f64,
    /// Meal slot (breakfast, lunch, dinner, snack)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    /// When the entry was logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<DateTime<Utc>>,
}

impl NutritionEntry {
    /// Create an entry logged now.
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, calories: f64) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            name: name.into(),
            calories,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            meal_type: None,
            logged_at: Some(Utc::now()),
        }
    }
}

/// A logged water amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterIntake {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user
    pub user_id: String,
    /// Amount in milliliters
    #[serde(default)]
    pub amount_ml: i64,
    /// When the water was logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<DateTime<Utc>>,
}

impl WaterIntake {
    /// Create an intake logged now.
    #[must_use]
    pub fn new(user_id: impl Into<String>, amount_ml: i64) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            amount_ml,
            logged_at: Some(Utc::now()),
        }
    }
}

/// A workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user
    pub user_id: String,
    /// Workout name
    pub name: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Duration in minutes
    #[serde(default)]
    pub duration_min: i64,
    /// Whether the session was completed
    #[serde(default)]
    pub completed: bool,
    /// When the session happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_at: Option<DateTime<Utc>>,
}

impl Workout {
    /// Create a workout performed now.
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            name: name.into(),
            notes: String::new(),
            duration_min: 0,
            completed: false,
            performed_at: Some(Utc::now()),
        }
    }
}

/// An exercise within a workout. Holds a plain foreign reference to its
/// parent; nothing cascades, the facade deletes children explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Parent workout's row id
    pub workout_id: String,
    /// Exercise name
    pub name: String,
    /// Number of sets
    #[serde(default)]
    pub sets: i64,
    /// Repetitions per set
    #[serde(default)]
    pub reps: i64,
    /// Load in kilograms
    #[serde(default)]
    pub weight_kg: f64,
    /// Order within the workout
    #[serde(default)]
    pub position: i64,
}

impl WorkoutExercise {
    /// Create an exercise with the schema's set/rep defaults.
    #[must_use]
    pub fn new(workout_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            workout_id: workout_id.into(),
            name: name.into(),
            sets: 3,
            reps: 10,
            weight_kg: 0.0,
            position: 0,
        }
    }
}

/// A body-measurement snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user
    pub user_id: String,
    /// Body weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Body fat percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_pct: Option<f64>,
    /// Named measurements in centimeters (waist, chest, ...)
    #[serde(default)]
    pub measurements: HashMap<String, f64>,
    /// Progress photo location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    /// When the snapshot was taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl ProgressEntry {
    /// Create a snapshot recorded now.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            weight_kg: None,
            body_fat_pct: None,
            measurements: HashMap::new(),
            photo_uri: None,
            recorded_at: Some(Utc::now()),
        }
    }
}

/// A saved recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user
    pub user_id: String,
    /// Recipe name
    pub name: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Preparation instructions
    #[serde(default)]
    pub instructions: String,
    /// Calories per serving
    #[serde(default)]
    pub calories: f64,
    /// Number of servings
    #[serde(default)]
    pub servings: i64,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    /// Create a one-serving recipe.
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            name: name.into(),
            ingredients: Vec::new(),
            instructions: String::new(),
            calories: 0.0,
            servings: 1,
            tags: Vec::new(),
        }
    }
}

/// A scheduled reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user
    pub user_id: String,
    /// Reminder title
    pub title: String,
    /// Time of day, `"HH:MM"`
    #[serde(default)]
    pub time: String,
    /// Weekday names the reminder fires on
    #[serde(default)]
    pub days: Vec<String>,
    /// Whether the reminder is active
    #[serde(default)]
    pub enabled: bool,
    /// Category (water, supplement, workout, general)
    #[serde(default)]
    pub kind: String,
}

impl Reminder {
    /// Create an enabled general reminder.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            title: title.into(),
            time: time.into(),
            days: Vec::new(),
            enabled: true,
            kind: "general".to_string(),
        }
    }
}

/// A supplement schedule entry with intake state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user
    pub user_id: String,
    /// Supplement name
    pub name: String,
    /// Dose description, e.g. `"2000 IU"`
    #[serde(default)]
    pub dose: String,
    /// Time of day, `"HH:MM"`
    #[serde(default)]
    pub time: String,
    /// Whether today's dose has been taken
    #[serde(default)]
    pub taken: bool,
    /// Dates (`YYYY-MM-DD`) on which the dose was taken
    #[serde(default)]
    pub completed_dates: Vec<String>,
}

impl Supplement {
    /// Create an untaken supplement entry.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        dose: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            name: name.into(),
            dose: dose.into(),
            time: time.into(),
            taken: false,
            completed_dates: Vec::new(),
        }
    }
}

/// Per-user nutrition targets. At most one row per user (upsert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionGoals {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user (unique)
    pub user_id: String,
    /// Daily calorie target
    #[serde(default)]
    pub calories_target: f64,
    /// Daily protein target in grams
    #[serde(default)]
    pub protein_target_g: f64,
    /// Daily carbohydrate target in grams
    #[serde(default)]
    pub carbs_target_g: f64,
    /// Daily fat target in grams
    #[serde(default)]
    pub fat_target_g: f64,
    /// Daily water target in milliliters
    #[serde(default)]
    pub water_target_ml: i64,
}

impl NutritionGoals {
    /// Create targets matching the schema defaults.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            calories_target: 2000.0,
            protein_target_g: 150.0,
            carbs_target_g: 250.0,
            fat_target_g: 70.0,
            water_target_ml: 2000,
        }
    }
}

/// Per-user application settings. At most one row per user (upsert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Row identity, assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user (unique)
    pub user_id: String,
    /// Theme name (system, light, dark)
    #[serde(default)]
    pub theme: String,
    /// Unit system (metric, imperial)
    #[serde(default)]
    pub units: String,
    /// Whether notifications are on
    #[serde(default)]
    pub notifications_enabled: bool,
}

impl UserSettings {
    /// Create settings matching the schema defaults.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            theme: "system".to_string(),
            units: "metric".to_string(),
            notifications_enabled: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
