//! Condition Matcher - Restricted Equality-Only Filters
//!
//! `TigerStyle`: Closed grammar, fail closed on anything else.
//!
//! The store supports exactly three filter shapes: `"col = ?"`,
//! `"col1 = ? AND col2 = ?"`, and `"1=1"` (match all). The typed
//! [`Condition`] value is the primary API; the textual form is a
//! compatibility adapter at the boundary. Unknown shapes must never match
//! everything, so they parse to [`Condition::Unsupported`], which matches
//! nothing on both backends.
//!
//! Ranges, `OR`, joins, ordering, and limits are deliberately not
//! expressible here; callers needing them post-process in memory after a
//! full-table select.

use crate::constants::CONDITION_CLAUSES_COUNT_MAX;
use crate::record::{Record, Value};

// =============================================================================
// EqualityPair
// =============================================================================

/// A single `column = value` equality test.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityPair {
    /// Column being tested
    pub column: String,
    /// Value the column must equal
    pub value: Value,
}

impl EqualityPair {
    /// Create an equality pair.
    #[must_use]
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Condition
// =============================================================================

/// A filter over the rows of one logical table.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Matches every row (`"1=1"`).
    All,
    /// Conjunction of equality tests; matches rows satisfying every pair.
    Equals(Vec<EqualityPair>),
    /// A condition outside the supported grammar. Matches nothing.
    Unsupported,
}

impl Condition {
    /// Match-all condition.
    #[must_use]
    pub fn all() -> Self {
        Self::All
    }

    /// Single-column equality condition.
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals(vec![EqualityPair::new(column, value)])
    }

    /// Add a further equality clause (conjunction).
    #[must_use]
    pub fn and(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        match self {
            Self::All => Self::eq(column, value),
            Self::Equals(mut pairs) => {
                pairs.push(EqualityPair::new(column, value));
                Self::Equals(pairs)
            }
            Self::Unsupported => Self::Unsupported,
        }
    }

    /// Parse the textual grammar with positionally bound parameters.
    ///
    /// Accepted shapes: `"1=1"`, `"col = ?"`, `"col1 = ? AND col2 = ?"`.
    /// Anything else, including `OR`, extra clauses, literal right-hand
    /// sides, or a parameter count mismatch, yields
    /// [`Condition::Unsupported`].
    #[must_use]
    pub fn parse(text: &str, params: &[Value]) -> Self {
        let trimmed = text.trim();

        let collapsed: String = trimmed.split_whitespace().collect();
        if collapsed == "1=1" {
            return if params.is_empty() {
                Self::All
            } else {
                Self::Unsupported
            };
        }

        // `OR` is outside the grammar in any casing.
        if trimmed
            .split_whitespace()
            .any(|word| word.eq_ignore_ascii_case("or"))
        {
            return Self::Unsupported;
        }

        let clauses: Vec<&str> = trimmed.split(" AND ").collect();
        if clauses.len() > CONDITION_CLAUSES_COUNT_MAX || clauses.len() != params.len() {
            return Self::Unsupported;
        }

        let mut pairs = Vec::with_capacity(clauses.len());
        for (clause, param) in clauses.iter().zip(params) {
            let Some((lhs, rhs)) = clause.split_once('=') else {
                return Self::Unsupported;
            };
            let column = lhs.trim();
            if rhs.trim() != "?" || !is_valid_column(column) {
                return Self::Unsupported;
            }
            pairs.push(EqualityPair::new(column, param.clone()));
        }

        Self::Equals(pairs)
    }

    /// Evaluate this condition against a plain record.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Unsupported => false,
            Self::Equals(pairs) => pairs.iter().all(|pair| {
                record
                    .get(&pair.column)
                    .is_some_and(|value| value.loosely_equals(&pair.value))
            }),
        }
    }

    /// Render as a parameterized SQL fragment for the native path.
    ///
    /// Returns `None` for [`Condition::Unsupported`] and for any pair whose
    /// column is not a plain identifier; the native executor short-circuits
    /// instead of issuing a query, so a malformed column matches nothing on
    /// both backends. Values are always bound, never interpolated.
    #[must_use]
    pub fn to_sql(&self) -> Option<(String, Vec<&Value>)> {
        match self {
            Self::All => Some(("1=1".to_string(), Vec::new())),
            Self::Unsupported => None,
            Self::Equals(pairs) => {
                if !pairs.iter().all(|pair| is_valid_column(&pair.column)) {
                    return None;
                }
                let fragment = pairs
                    .iter()
                    .map(|pair| format!("{} = ?", pair.column))
                    .collect::<Vec<_>>()
                    .join(" AND ");
                let binds = pairs.iter().map(|pair| &pair.value).collect();
                Some((fragment, binds))
            }
        }
    }

    /// Whether this is the recognized match-all special case.
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Column names must be plain lowercase identifiers.
fn is_valid_column(column: &str) -> bool {
    !column.is_empty()
        && column
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn supplement() -> Record {
        Record::new()
            .with("id", "1700000000000-ab12cd34")
            .with("user_id", "demo-1")
            .with("name", "Vitamin D3")
            .with("taken", false)
    }

    #[test]
    fn test_parse_match_all() {
        assert_eq!(Condition::parse("1=1", &[]), Condition::All);
        assert_eq!(Condition::parse(" 1 = 1 ", &[]), Condition::All);
    }

    #[test]
    fn test_parse_single_equality() {
        let cond = Condition::parse("user_id = ?", &[Value::Text("demo-1".into())]);
        assert_eq!(cond, Condition::eq("user_id", "demo-1"));
    }

    #[test]
    fn test_parse_two_clause_conjunction() {
        let cond = Condition::parse(
            "user_id = ? AND taken = ?",
            &[Value::Text("demo-1".into()), Value::Boolean(false)],
        );
        assert_eq!(
            cond,
            Condition::eq("user_id", "demo-1").and("taken", false)
        );
    }

    #[test]
    fn test_parse_fails_closed() {
        // OR is outside the grammar
        let cond = Condition::parse(
            "user_id = ? OR taken = ?",
            &[Value::Text("x".into()), Value::Boolean(true)],
        );
        assert_eq!(cond, Condition::Unsupported);

        // literal right-hand side
        assert_eq!(
            Condition::parse("user_id = 'demo'", &[]),
            Condition::Unsupported
        );

        // parameter count mismatch
        assert_eq!(Condition::parse("user_id = ?", &[]), Condition::Unsupported);

        // too many clauses
        let params = vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)];
        assert_eq!(
            Condition::parse("a = ? AND b = ? AND c = ?", &params),
            Condition::Unsupported
        );

        // range operators
        assert_eq!(
            Condition::parse("age > ?", &[Value::Integer(30)]),
            Condition::Unsupported
        );
    }

    #[test]
    fn test_matches_equality() {
        let row = supplement();
        assert!(Condition::eq("user_id", "demo-1").matches(&row));
        assert!(!Condition::eq("user_id", "other").matches(&row));
        assert!(Condition::eq("user_id", "demo-1")
            .and("name", "Vitamin D3")
            .matches(&row));
        assert!(!Condition::eq("user_id", "demo-1")
            .and("name", "Magnesium")
            .matches(&row));
    }

    #[test]
    fn test_matches_boolean_integer_coercion() {
        let row = supplement();
        // Callers on the native path pass 0/1 for booleans.
        assert!(Condition::eq("taken", 0_i64).matches(&row));
        assert!(!Condition::eq("taken", 1_i64).matches(&row));
    }

    #[test]
    fn test_matches_all_and_unsupported() {
        let row = supplement();
        assert!(Condition::all().matches(&row));
        assert!(!Condition::Unsupported.matches(&row));
    }

    #[test]
    fn test_missing_column_does_not_match() {
        let row = supplement();
        assert!(!Condition::eq("nonexistent", "x").matches(&row));
    }

    #[test]
    fn test_to_sql() {
        let all = Condition::all();
        let (sql, binds) = all.to_sql().unwrap();
        assert_eq!(sql, "1=1");
        assert!(binds.is_empty());

        let cond = Condition::eq("user_id", "demo-1").and("taken", 0_i64);
        let (sql, binds) = cond.to_sql().unwrap();
        assert_eq!(sql, "user_id = ? AND taken = ?");
        assert_eq!(binds.len(), 2);

        assert!(Condition::Unsupported.to_sql().is_none());
    }

    #[test]
    fn test_to_sql_rejects_non_identifier_columns() {
        // A typed constructor accepts any string; rendering must refuse to
        // splice anything that is not a plain identifier into the fragment.
        let hostile = Condition::eq("name = name OR 1=1 --", "x");
        assert!(hostile.to_sql().is_none());

        let mixed = Condition::eq("user_id", "u1").and("taken; DROP TABLE users", true);
        assert!(mixed.to_sql().is_none());

        // And it still matches nothing in memory: no record has such a column.
        let row = supplement();
        assert!(!Condition::eq("name = name OR 1=1 --", "x").matches(&row));
    }
}
