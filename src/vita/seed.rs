//! Demo data seeding for the fallback substrate.
//!
//! A fresh key-value store is empty, with no migration history to hang an
//! "already seeded" marker on. Seeding therefore keys off the demo identity
//! itself: if the well-known demo user exists, the store is considered
//! seeded and nothing is written.

use crate::constants::{DEMO_USER_EMAIL, DEMO_USER_NAME};
use crate::storage::StorageResult;
use crate::vita::models::{
    NutritionGoals, Reminder, Supplement, User, UserSettings, Workout, WorkoutExercise,
};
use crate::vita::Database;

/// Populate the store with a demo user and a small set of rows for each
/// domain a first-run screen renders. Idempotent: a second call finds the
/// demo user and returns without writing.
pub(crate) async fn seed_demo(db: &Database) -> StorageResult<()> {
    if db.user_by_email(DEMO_USER_EMAIL).await?.is_some() {
        tracing::debug!("demo data already present, skipping seed");
        return Ok(());
    }

    let user_id = db
        .save_user(&User::new(DEMO_USER_EMAIL, DEMO_USER_NAME))
        .await?;

    db.save_goals(&NutritionGoals::new(&user_id)).await?;
    db.save_settings(&UserSettings::new(&user_id)).await?;

    db.save_supplement(&Supplement::new(&user_id, "Vitamin D3", "2000 IU", "08:00"))
        .await?;
    db.save_supplement(&Supplement::new(&user_id, "Magnesium", "400 mg", "21:00"))
        .await?;

    let mut workout = Workout::new(&user_id, "Full body A");
    workout.duration_min = 45;
    let workout_id = db.save_workout(&workout).await?;
    for (position, name) in ["Squat", "Bench press", "Row"].iter().enumerate() {
        let mut exercise = WorkoutExercise::new(&workout_id, *name);
        exercise.position = i64::try_from(position).unwrap_or(0);
        db.save_workout_exercise(&exercise).await?;
    }

    let mut reminder = Reminder::new(&user_id, "Drink water", "10:00");
    reminder.kind = "water".to_string();
    db.save_reminder(&reminder).await?;

    tracing::info!(user_id = %user_id, "seeded demo data");
    Ok(())
}
