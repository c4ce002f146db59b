//! Backend parity: the same operation sequence must produce the same
//! observable results on the fallback store and on the native engine.
//!
//! Row identifiers and timestamps differ between runs, so the transcript
//! records only stable observations (counts and field values, sorted).

use std::sync::Arc;

use vita_store::{
    Condition, FallbackStore, MemoryKv, Record, StorageBackend, TableName, Value,
};

#[cfg(feature = "native")]
use vita_store::NativeExecutor;

/// Runs a fixed CRUD script and returns everything an application could
/// observe about it.
async fn run_script(backend: &dyn StorageBackend) -> Vec<String> {
    let mut transcript = Vec::new();

    backend.ensure_schema().await.unwrap();

    for (user, name, dose) in [
        ("u1", "Vitamin D3", "2000 IU"),
        ("u1", "Magnesium", "400 mg"),
        ("u2", "Zinc", "25 mg"),
    ] {
        backend
            .insert(
                TableName::Supplements,
                Record::new()
                    .with("user_id", user)
                    .with("name", name)
                    .with("dose", dose),
            )
            .await
            .unwrap();
    }

    let observe = |label: &str, rows: &[Record], transcript: &mut Vec<String>| {
        let mut names: Vec<String> = rows
            .iter()
            .map(|row| {
                format!(
                    "{}/{}/taken={}",
                    row.get("user_id").and_then(Value::as_str).unwrap(),
                    row.get("name").and_then(Value::as_str).unwrap(),
                    row.get("taken").and_then(Value::as_bool).unwrap(),
                )
            })
            .collect();
        names.sort();
        transcript.push(format!("{label}: {}", names.join(", ")));
    };

    let all = backend
        .select(TableName::Supplements, &Condition::all())
        .await
        .unwrap();
    observe("all", all.rows(), &mut transcript);

    let u1 = backend
        .select(TableName::Supplements, &Condition::eq("user_id", "u1"))
        .await
        .unwrap();
    observe("u1", u1.rows(), &mut transcript);

    let two_clause = backend
        .select(
            TableName::Supplements,
            &Condition::eq("user_id", "u1").and("name", "Magnesium"),
        )
        .await
        .unwrap();
    observe("u1+magnesium", two_clause.rows(), &mut transcript);

    let unsupported = backend
        .select(
            TableName::Supplements,
            &Condition::parse("user_id = ? OR name = ?", &[
                Value::from("u1"),
                Value::from("Zinc"),
            ]),
        )
        .await
        .unwrap();
    transcript.push(format!("unsupported: {} rows", unsupported.len()));

    let updated = backend
        .update(
            TableName::Supplements,
            &Condition::eq("user_id", "u1"),
            Record::new().with("taken", true),
        )
        .await
        .unwrap();
    transcript.push(format!("updated: {updated}"));

    let after_update = backend
        .select(TableName::Supplements, &Condition::all())
        .await
        .unwrap();
    observe("after-update", after_update.rows(), &mut transcript);

    let deleted = backend
        .delete(
            TableName::Supplements,
            &Condition::eq("name", "Magnesium"),
        )
        .await
        .unwrap();
    transcript.push(format!("deleted: {deleted}"));

    let missing = backend
        .delete(TableName::Supplements, &Condition::eq("name", "Nothing"))
        .await
        .unwrap();
    transcript.push(format!("deleted-missing: {missing}"));

    let remaining = backend
        .select(TableName::Supplements, &Condition::all())
        .await
        .unwrap();
    observe("remaining", remaining.rows(), &mut transcript);

    transcript
}

fn expected_transcript() -> Vec<String> {
    vec![
        "all: u1/Magnesium/taken=false, u1/Vitamin D3/taken=false, u2/Zinc/taken=false".to_string(),
        "u1: u1/Magnesium/taken=false, u1/Vitamin D3/taken=false".to_string(),
        "u1+magnesium: u1/Magnesium/taken=false".to_string(),
        "unsupported: 0 rows".to_string(),
        "updated: 2".to_string(),
        "after-update: u1/Magnesium/taken=true, u1/Vitamin D3/taken=true, u2/Zinc/taken=false"
            .to_string(),
        "deleted: 1".to_string(),
        "deleted-missing: 0".to_string(),
        "remaining: u1/Vitamin D3/taken=true, u2/Zinc/taken=false".to_string(),
    ]
}

#[tokio::test]
async fn test_fallback_matches_expected_transcript() {
    let backend = FallbackStore::new(Arc::new(MemoryKv::new()));
    assert_eq!(run_script(&backend).await, expected_transcript());
}

#[cfg(feature = "native")]
#[tokio::test]
async fn test_native_matches_expected_transcript() {
    let backend = NativeExecutor::open("sqlite::memory:").await.unwrap();
    assert_eq!(run_script(&backend).await, expected_transcript());
}

#[cfg(feature = "native")]
#[tokio::test]
async fn test_native_unique_violation_is_constraint() {
    let backend = NativeExecutor::open("sqlite::memory:").await.unwrap();
    backend.ensure_schema().await.unwrap();

    let row = Record::new()
        .with("email", "dup@example.com")
        .with("name", "A");
    backend.insert(TableName::Users, row.clone()).await.unwrap();

    let err = backend.insert(TableName::Users, row).await.unwrap_err();
    assert!(err.is_constraint());

    // Fallback uniqueness is advisory: the same double insert succeeds and
    // the facade's upsert path is what keeps one row per email there.
    let fallback = FallbackStore::new(Arc::new(MemoryKv::new()));
    let row = Record::new()
        .with("email", "dup@example.com")
        .with("name", "A");
    fallback.insert(TableName::Users, row.clone()).await.unwrap();
    fallback.insert(TableName::Users, row).await.unwrap();
    let rows = fallback
        .select(TableName::Users, &Condition::eq("email", "dup@example.com"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}
