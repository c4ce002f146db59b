//! Record - Rows, Scalar Values, and Cursor Results
//!
//! `TigerStyle`: Explicit types, no ad hoc maps through untyped code.
//!
//! A [`Record`] is an ordered mapping from column name to scalar [`Value`].
//! Both storage backends produce and consume the same record shape, so
//! callers never see which substrate is active. A [`RowSet`] is the uniform
//! cursor-like result (`len` + `item(i)`) returned by every select.

use std::collections::btree_map;
use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::constants::ROW_ID_TOKEN_BYTES;

// =============================================================================
// Value
// =============================================================================

/// A scalar value stored in a single column.
///
/// Booleans are stored as integers on the relational engine and as JSON
/// booleans on the key-value substrate; [`Value::loosely_equals`] and the
/// schema's read normalization keep the two views interchangeable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / SQL NULL
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Real(f64),
    /// UTF-8 text (also carries timestamps as RFC 3339)
    Text(String),
    /// Boolean (integer 0/1 on the relational engine)
    Boolean(bool),
    /// Nested JSON blob (arrays/objects), stored as text on the native path
    Json(serde_json::Value),
}

impl Value {
    /// View as text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// View as integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Boolean(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// View as float, widening integers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(f) => Some(*f),
            #[allow(clippy::cast_precision_loss)]
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// View as boolean, accepting the integer 0/1 encoding.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::Integer(0) => Some(false),
            Self::Integer(1) => Some(true),
            _ => None,
        }
    }

    /// View as nested JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Equality with cross-encoding coercion.
    ///
    /// `Boolean(true)` equals `Integer(1)`, `Integer(2)` equals `Real(2.0)`.
    /// Condition parameters arrive from callers who may use either encoding.
    #[must_use]
    pub fn loosely_equals(&self, other: &Value) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (Self::Boolean(b), Self::Integer(i)) | (Self::Integer(i), Self::Boolean(b)) => {
                i64::from(*b) == *i
            }
            #[allow(clippy::cast_precision_loss)]
            (Self::Integer(i), Self::Real(f)) | (Self::Real(f), Self::Integer(i)) => {
                (*i as f64 - f).abs() < f64::EPSILON
            }
            _ => false,
        }
    }

    /// Convert into a plain JSON value (the fallback wire form).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Real(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::Json(v) => v.clone(),
        }
    }

    /// Convert from a plain JSON value.
    ///
    /// Arrays and objects become [`Value::Json`]; whole numbers become
    /// [`Value::Integer`].
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Real(n.as_f64().unwrap_or(0.0)), Self::Integer),
            serde_json::Value::String(s) => Self::Text(s),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Json(other)
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::from_json(v)
    }
}

// =============================================================================
// Record
// =============================================================================

/// An ordered column-name → value mapping representing one logical row.
///
/// Ordering is stable (sorted by column name) so serialized forms and
/// iteration are deterministic across backends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, builder style.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    /// Set a column in place.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Get a column value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Remove a column, returning its value.
    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.columns.remove(column)
    }

    /// Whether a column is present.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Number of columns present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the record has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate columns in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into this record; columns in `other` win.
    pub fn merge(&mut self, other: Record) {
        for (column, value) in other.columns {
            self.columns.insert(column, value);
        }
    }

    /// Convert into the JSON object form used on the key-value substrate.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .columns
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Build a record from a JSON object.
    ///
    /// Returns `None` for non-object values. JSON nulls are dropped: an
    /// absent column and an explicit null are the same thing to the store.
    #[must_use]
    pub fn from_json_value(value: serde_json::Value) -> Option<Self> {
        let serde_json::Value::Object(map) = value else {
            return None;
        };
        let mut record = Self::new();
        for (column, value) in map {
            if value.is_null() {
                continue;
            }
            record.set(column, Value::from_json(value));
        }
        Some(record)
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

// =============================================================================
// RowSet
// =============================================================================

/// Cursor-like select result, identical in shape on both backends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    rows: Vec<Record>,
}

impl RowSet {
    /// Create a row set from records.
    #[must_use]
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    /// Create an empty row set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Indexed row access.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    /// First row, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Record> {
        self.rows.first()
    }

    /// All rows as a slice.
    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Consume into the underlying rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }
}

impl IntoIterator for RowSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

// =============================================================================
// Row Identity
// =============================================================================

/// Generate a synthetic row identifier: `"{millis}-{token}"`.
///
/// The key-value substrate has no autoincrement concept, so row identity is
/// minted at insert time from the current timestamp plus a short random
/// token. Practically unique without a central counter.
#[must_use]
pub fn generate_row_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let token = Uuid::new_v4().simple().to_string();
    format!("{millis}-{}", &token[..ROW_ID_TOKEN_BYTES])
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_coercions() {
        assert_eq!(Value::Integer(1).as_bool(), Some(true));
        assert_eq!(Value::Integer(0).as_bool(), Some(false));
        assert_eq!(Value::Integer(2).as_bool(), None);
        assert_eq!(Value::Boolean(true).as_i64(), Some(1));
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
    }

    #[test]
    fn test_loose_equality() {
        assert!(Value::Boolean(false).loosely_equals(&Value::Integer(0)));
        assert!(Value::Integer(2).loosely_equals(&Value::Real(2.0)));
        assert!(!Value::Boolean(true).loosely_equals(&Value::Integer(0)));
        assert!(!Value::Text("1".into()).loosely_equals(&Value::Integer(1)));
    }

    #[test]
    fn test_json_round_trip() {
        let record = Record::new()
            .with("name", "Vitamin D3")
            .with("taken", false)
            .with("dose_count", 2_i64)
            .with("tags", serde_json::json!(["morning"]));

        let json = record.to_json_value();
        let back = Record::from_json_value(json).unwrap();

        assert_eq!(back.get("name"), Some(&Value::Text("Vitamin D3".into())));
        assert_eq!(back.get("taken"), Some(&Value::Boolean(false)));
        assert_eq!(back.get("dose_count"), Some(&Value::Integer(2)));
        assert_eq!(
            back.get("tags"),
            Some(&Value::Json(serde_json::json!(["morning"])))
        );
    }

    #[test]
    fn test_from_json_drops_nulls() {
        let back =
            Record::from_json_value(serde_json::json!({ "a": null, "b": "kept" })).unwrap();
        assert!(!back.contains("a"));
        assert!(back.contains("b"));
    }

    #[test]
    fn test_merge_overrides() {
        let mut record = Record::new().with("a", 1_i64).with("b", 2_i64);
        record.merge(Record::new().with("b", 9_i64).with("c", 3_i64));

        assert_eq!(record.get("a"), Some(&Value::Integer(1)));
        assert_eq!(record.get("b"), Some(&Value::Integer(9)));
        assert_eq!(record.get("c"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_row_set_cursor_shape() {
        let rows = RowSet::new(vec![Record::new().with("id", "a")]);
        assert_eq!(rows.len(), 1);
        assert!(rows.item(0).is_some());
        assert!(rows.item(1).is_none());
    }

    #[test]
    fn test_row_id_shape() {
        let id = generate_row_id();
        let (millis, token) = id.split_once('-').unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(token.len(), ROW_ID_TOKEN_BYTES);
    }

    #[test]
    fn test_row_ids_unique() {
        let a = generate_row_id();
        let b = generate_row_id();
        assert_ne!(a, b);
    }
}
