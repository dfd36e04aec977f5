//! Filter evaluation for the in-memory host engine.
//!
//! `FilterEvaluator` walks a (possibly rewritten) condition tree against one
//! row of field values.

use std::collections::HashSet;

use ormlike_proto::{FilterExpr, Value};

/// Extract all field names referenced in a filter expression.
pub fn extract_filter_fields(filter: &FilterExpr) -> HashSet<String> {
    let mut fields = HashSet::new();
    extract_filter_fields_inner(filter, &mut fields);
    fields
}

fn extract_filter_fields_inner(filter: &FilterExpr, fields: &mut HashSet<String>) {
    match filter {
        FilterExpr::And(children) | FilterExpr::Or(children) => {
            for child in children {
                extract_filter_fields_inner(child, fields);
            }
        }
        leaf => {
            if let Some(field) = leaf.field() {
                fields.insert(field.to_string());
            }
        }
    }
}

/// Evaluates filter expressions against entity data.
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Evaluate a filter expression against a row of field values.
    ///
    /// Returns `true` if the row matches the filter. Empty `And` is true,
    /// empty `Or` is false.
    pub fn evaluate(filter: &FilterExpr, row: &[(String, Value)]) -> bool {
        match filter {
            FilterExpr::Eq { field, value } => {
                Self::compare_field(row, field, value, Self::values_equal)
            }
            FilterExpr::Ne { field, value } => {
                Self::compare_field(row, field, value, |a, b| !Self::values_equal(a, b))
            }
            FilterExpr::Lt { field, value } => Self::compare_field(row, field, value, |a, b| {
                Self::compare_values(a, b).is_some_and(|ord| ord.is_lt())
            }),
            FilterExpr::Le { field, value } => Self::compare_field(row, field, value, |a, b| {
                Self::compare_values(a, b).is_some_and(|ord| ord.is_le())
            }),
            FilterExpr::Gt { field, value } => Self::compare_field(row, field, value, |a, b| {
                Self::compare_values(a, b).is_some_and(|ord| ord.is_gt())
            }),
            FilterExpr::Ge { field, value } => Self::compare_field(row, field, value, |a, b| {
                Self::compare_values(a, b).is_some_and(|ord| ord.is_ge())
            }),
            FilterExpr::In { field, values } => match Self::get_field_value(row, field) {
                Some(fv) => values.iter().any(|v| Self::values_equal(fv, v)),
                None => false,
            },
            FilterExpr::NotIn { field, values } => match Self::get_field_value(row, field) {
                Some(fv) => !values.iter().any(|v| Self::values_equal(fv, v)),
                None => true, // NULL is not in any set
            },
            FilterExpr::IsNull { field } => {
                matches!(Self::get_field_value(row, field), None | Some(Value::Null))
            }
            FilterExpr::IsNotNull { field } => {
                !matches!(Self::get_field_value(row, field), None | Some(Value::Null))
            }
            FilterExpr::Like { field, pattern } => match Self::get_field_value(row, field) {
                Some(Value::String(s)) => Self::like_match(s, pattern),
                _ => false,
            },
            FilterExpr::NotLike { field, pattern } => match Self::get_field_value(row, field) {
                Some(Value::String(s)) => !Self::like_match(s, pattern),
                _ => true,
            },
            FilterExpr::And(children) => children.iter().all(|c| Self::evaluate(c, row)),
            FilterExpr::Or(children) => children.iter().any(|c| Self::evaluate(c, row)),
        }
    }

    /// Get a field value from a row by name.
    fn get_field_value<'a>(row: &'a [(String, Value)], field: &str) -> Option<&'a Value> {
        row.iter().find(|(name, _)| name == field).map(|(_, v)| v)
    }

    /// Compare a field value with a comparator function.
    fn compare_field<F>(row: &[(String, Value)], field: &str, value: &Value, comparator: F) -> bool
    where
        F: FnOnce(&Value, &Value) -> bool,
    {
        match Self::get_field_value(row, field) {
            Some(fv) => comparator(fv, value),
            None => false, // Missing field doesn't match
        }
    }

    /// Check if two values are equal.
    fn values_equal(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Int32(a), Value::Int64(b)) => (*a as i64) == *b,
            (Value::Int64(a), Value::Int32(b)) => *a == (*b as i64),
            (Value::Float32(a), Value::Float32(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a == b,
            (Value::Float32(a), Value::Float64(b)) => (*a as f64) == *b,
            (Value::Float64(a), Value::Float32(b)) => *a == (*b as f64),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            _ => false,
        }
    }

    /// Compare two values, returning their ordering if comparable.
    fn compare_values(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
        match (a, b) {
            (Value::Int32(a), Value::Int32(b)) => Some(a.cmp(b)),
            (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
            (Value::Int32(a), Value::Int64(b)) => Some((*a as i64).cmp(b)),
            (Value::Int64(a), Value::Int32(b)) => Some(a.cmp(&(*b as i64))),
            (Value::Float32(a), Value::Float32(b)) => a.partial_cmp(b),
            (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
            (Value::Float32(a), Value::Float64(b)) => (*a as f64).partial_cmp(b),
            (Value::Float64(a), Value::Float32(b)) => a.partial_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Match a string against a SQL LIKE pattern.
    ///
    /// Supports:
    /// - `%` matches zero or more characters
    /// - `_` matches exactly one character
    /// - `\%`, `\_` and `\\` match the literal character
    ///
    /// Runs in `O(value * pattern)` time: only the most recent `%` is ever
    /// retried, so a long run of wildcard segments cannot blow up.
    pub fn like_match(value: &str, pattern: &str) -> bool {
        let Some(tokens) = Self::like_tokens(pattern) else {
            // A dangling escape matches nothing.
            return false;
        };
        let value: Vec<char> = value.chars().collect();

        let (mut v, mut p) = (0, 0);
        // Token index after the last `%`, and the value index it resumes from.
        let mut star: Option<(usize, usize)> = None;

        while v < value.len() {
            match tokens.get(p) {
                Some(LikeToken::Any) => {
                    star = Some((p + 1, v));
                    p += 1;
                }
                Some(LikeToken::One) => {
                    v += 1;
                    p += 1;
                }
                Some(LikeToken::Lit(c)) if *c == value[v] => {
                    v += 1;
                    p += 1;
                }
                _ => match star {
                    Some((sp, sv)) => {
                        star = Some((sp, sv + 1));
                        p = sp;
                        v = sv + 1;
                    }
                    None => return false,
                },
            }
        }

        tokens[p..].iter().all(|t| *t == LikeToken::Any)
    }

    /// Split a LIKE pattern into tokens, resolving escapes.
    ///
    /// Returns `None` when the pattern ends in an unpaired backslash.
    fn like_tokens(pattern: &str) -> Option<Vec<LikeToken>> {
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                '%' => {
                    if tokens.last() == Some(&LikeToken::Any) {
                        continue;
                    }
                    LikeToken::Any
                }
                '_' => LikeToken::One,
                '\\' => LikeToken::Lit(chars.next()?),
                c => LikeToken::Lit(c),
            };
            tokens.push(token);
        }
        Some(tokens)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    Any,
    One,
    Lit(char),
}
