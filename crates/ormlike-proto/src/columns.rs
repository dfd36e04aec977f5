//! Build condition trees from column-to-value maps.
//!
//! A column map is the generic "equality/inclusion" filter shape: each entry
//! pins a column to one value (`Eq`) or to a list of alternatives (`In`).

use std::collections::BTreeMap;

use crate::error::Error;
use crate::query::FilterExpr;
use crate::value::Value;

/// The right-hand side of a column map entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// A single value, compared with equality.
    One(Value),
    /// A list of alternatives, compared with set membership.
    Many(Vec<Value>),
}

impl From<Value> for ColumnValue {
    fn from(v: Value) -> Self {
        ColumnValue::One(v)
    }
}

impl ColumnValue {
    /// Build an equality entry.
    pub fn one(value: impl Into<Value>) -> Self {
        ColumnValue::One(value.into())
    }

    /// Build a membership entry from anything convertible to values.
    pub fn many<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        ColumnValue::Many(values.into_iter().map(Into::into).collect())
    }

    fn into_leaf(self, column: String) -> FilterExpr {
        match self {
            ColumnValue::One(value) => FilterExpr::Eq {
                field: column,
                value,
            },
            ColumnValue::Many(values) => FilterExpr::In {
                field: column,
                values,
            },
        }
    }
}

/// Build a filter from column entries.
///
/// Entries are emitted in ascending column order. No entries yields `None`,
/// a single entry yields its bare leaf, several entries are ANDed.
pub fn filter_from_columns<I, K>(columns: I) -> Option<FilterExpr>
where
    I: IntoIterator<Item = (K, ColumnValue)>,
    K: Into<String>,
{
    let sorted: BTreeMap<String, ColumnValue> = columns
        .into_iter()
        .map(|(k, v)| (k.into(), v))
        .collect();

    let mut leaves: Vec<FilterExpr> = sorted
        .into_iter()
        .map(|(column, value)| value.into_leaf(column))
        .collect();

    match leaves.len() {
        0 => None,
        1 => leaves.pop(),
        _ => Some(FilterExpr::And(leaves)),
    }
}

/// Build a filter from a JSON object such as `{"name": ["jessica", "%o%"], "age": 53}`.
pub fn filter_from_json(json: &serde_json::Value) -> Result<Option<FilterExpr>, Error> {
    let object = json
        .as_object()
        .ok_or_else(|| Error::InvalidFilter("column map must be a JSON object".to_string()))?;

    let mut columns = Vec::with_capacity(object.len());
    for (column, value) in object {
        let entry = match value {
            serde_json::Value::Array(items) => ColumnValue::Many(
                items
                    .iter()
                    .map(|item| json_scalar(column, item))
                    .collect::<Result<_, _>>()?,
            ),
            other => ColumnValue::One(json_scalar(column, other)?),
        };
        columns.push((column.clone(), entry));
    }

    Ok(filter_from_columns(columns))
}

fn json_scalar(column: &str, value: &serde_json::Value) -> Result<Value, Error> {
    match value {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i32::try_from(i).map(Value::Int32).unwrap_or(Value::Int64(i)))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float64(f))
            } else {
                Err(Error::InvalidFilter(format!(
                    "number out of range for column '{}': {}",
                    column, n
                )))
            }
        }
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(Error::InvalidFilter(
            format!("column '{}' must hold a scalar or a list of scalars", column),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_map_has_no_filter() {
        let columns: Vec<(String, ColumnValue)> = vec![];
        assert_eq!(filter_from_columns(columns), None);
    }

    #[test]
    fn test_single_column_is_bare_leaf() {
        let filter = filter_from_columns([("name", ColumnValue::one("jessica"))]);
        assert_eq!(filter, Some(FilterExpr::eq("name", "jessica")));
    }

    #[test]
    fn test_columns_are_sorted_and_anded() {
        let filter = filter_from_columns([
            ("name", ColumnValue::many(["jessica", "%o%"])),
            ("age", ColumnValue::many([53, 20])),
        ]);

        assert_eq!(
            filter,
            Some(FilterExpr::and(vec![
                FilterExpr::in_values("age", vec![Value::Int32(53), Value::Int32(20)]),
                FilterExpr::in_values("name", vec!["jessica".into(), "%o%".into()]),
            ]))
        );
    }

    #[test]
    fn test_json_column_map() {
        let filter = filter_from_json(&json!({
            "name": "%a%",
            "age": 20,
            "score": 1.5,
            "other": ["aa%", "bb", null],
        }))
        .unwrap();

        assert_eq!(
            filter,
            Some(FilterExpr::and(vec![
                FilterExpr::eq("age", 20),
                FilterExpr::eq("name", "%a%"),
                FilterExpr::in_values("other", vec!["aa%".into(), "bb".into(), Value::Null]),
                FilterExpr::eq("score", 1.5f64),
            ]))
        );
    }

    #[test]
    fn test_json_large_integer_widens() {
        let filter = filter_from_json(&json!({ "views": 5_000_000_000i64 })).unwrap();
        assert_eq!(filter, Some(FilterExpr::eq("views", 5_000_000_000i64)));
    }

    #[test]
    fn test_json_rejects_nested_objects() {
        let err = filter_from_json(&json!({ "name": { "first": "amy" } })).unwrap_err();
        assert!(err.to_string().contains("name"));

        let err = filter_from_json(&json!({ "name": [["amy"]] })).unwrap_err();
        assert!(matches!(err, Error::InvalidFilter(_)));
    }

    #[test]
    fn test_json_requires_object() {
        assert!(filter_from_json(&json!(["name", "amy"])).is_err());
    }
}
