//! Query IR types: the condition tree and the read query that carries it.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A filter condition wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// The filter expression.
    pub expression: FilterExpr,
}

impl Filter {
    /// Create a filter from an expression.
    pub fn new(expression: FilterExpr) -> Self {
        Self { expression }
    }
}

impl From<FilterExpr> for Filter {
    fn from(expression: FilterExpr) -> Self {
        Self { expression }
    }
}

/// Condition tree for querying entities.
///
/// `And`/`Or` nest arbitrarily, so grouping survives any leaf replacement.
/// Serialized with serde only because of the recursive structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpr {
    /// Field equals value.
    Eq { field: String, value: Value },
    /// Field not equals value.
    Ne { field: String, value: Value },
    /// Field less than value.
    Lt { field: String, value: Value },
    /// Field less than or equal to value.
    Le { field: String, value: Value },
    /// Field greater than value.
    Gt { field: String, value: Value },
    /// Field greater than or equal to value.
    Ge { field: String, value: Value },
    /// Field is in a set of values.
    In { field: String, values: Vec<Value> },
    /// Field is not in a set of values.
    NotIn { field: String, values: Vec<Value> },
    /// Field is null.
    IsNull { field: String },
    /// Field is not null.
    IsNotNull { field: String },
    /// Field matches a LIKE pattern.
    Like { field: String, pattern: String },
    /// Field does not match a LIKE pattern.
    NotLike { field: String, pattern: String },
    /// All children must be true.
    And(Vec<FilterExpr>),
    /// At least one child must be true.
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Create an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a not-equal filter.
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Ne {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a less-than filter.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Lt {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a less-than-or-equal filter.
    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Le {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than filter.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Gt {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than-or-equal filter.
    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Ge {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an IN filter.
    pub fn in_values(field: impl Into<String>, values: Vec<Value>) -> Self {
        FilterExpr::In {
            field: field.into(),
            values,
        }
    }

    /// Create a NOT IN filter.
    pub fn not_in_values(field: impl Into<String>, values: Vec<Value>) -> Self {
        FilterExpr::NotIn {
            field: field.into(),
            values,
        }
    }

    /// Create an IS NULL filter.
    pub fn is_null(field: impl Into<String>) -> Self {
        FilterExpr::IsNull {
            field: field.into(),
        }
    }

    /// Create an IS NOT NULL filter.
    pub fn is_not_null(field: impl Into<String>) -> Self {
        FilterExpr::IsNotNull {
            field: field.into(),
        }
    }

    /// Create a LIKE filter.
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        FilterExpr::Like {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a NOT LIKE filter.
    pub fn not_like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        FilterExpr::NotLike {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Create an AND over the given children.
    pub fn and(exprs: Vec<FilterExpr>) -> Self {
        FilterExpr::And(exprs)
    }

    /// Create an OR over the given children.
    pub fn or(exprs: Vec<FilterExpr>) -> Self {
        FilterExpr::Or(exprs)
    }

    /// The field a leaf compares against, or `None` for `And`/`Or`.
    pub fn field(&self) -> Option<&str> {
        match self {
            FilterExpr::Eq { field, .. }
            | FilterExpr::Ne { field, .. }
            | FilterExpr::Lt { field, .. }
            | FilterExpr::Le { field, .. }
            | FilterExpr::Gt { field, .. }
            | FilterExpr::Ge { field, .. }
            | FilterExpr::In { field, .. }
            | FilterExpr::NotIn { field, .. }
            | FilterExpr::IsNull { field }
            | FilterExpr::IsNotNull { field }
            | FilterExpr::Like { field, .. }
            | FilterExpr::NotLike { field, .. } => Some(field),
            FilterExpr::And(_) | FilterExpr::Or(_) => None,
        }
    }
}

/// Order specification for sorting results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSpec {
    /// Field to order by.
    pub field: String,
    /// Sort direction.
    pub direction: OrderDirection,
}

impl OrderSpec {
    /// Create an ascending order spec.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Asc,
        }
    }

    /// Create a descending order spec.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Desc,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Pagination parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of results to return.
    pub limit: u32,
    /// Number of results to skip.
    pub offset: u32,
}

impl Pagination {
    /// Create pagination with limit and offset.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Create pagination with just a limit.
    pub fn limit(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }
}

/// A read query against a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQuery {
    /// The root entity type to query.
    pub root_entity: String,
    /// Fields to select from the root entity (empty selects all).
    pub fields: Vec<String>,
    /// Optional filter; `None` means the query has no WHERE clause.
    pub filter: Option<Filter>,
    /// Ordering specification.
    pub order_by: Vec<OrderSpec>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl GraphQuery {
    /// Create a new query for an entity.
    pub fn new(root_entity: impl Into<String>) -> Self {
        Self {
            root_entity: root_entity.into(),
            fields: vec![],
            filter: None,
            order_by: vec![],
            pagination: None,
        }
    }

    /// Set the fields to select.
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Add a field to select.
    pub fn select(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Set a filter for this query.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// AND an additional condition onto the existing filter.
    ///
    /// An existing `And` root is extended in place; any other root becomes
    /// the first child of a new `And`.
    pub fn and_where(mut self, expr: FilterExpr) -> Self {
        self.filter = Some(match self.filter.take() {
            None => Filter::new(expr),
            Some(Filter {
                expression: FilterExpr::And(mut children),
            }) => {
                children.push(expr);
                Filter::new(FilterExpr::And(children))
            }
            Some(Filter { expression }) => Filter::new(FilterExpr::and(vec![expression, expr])),
        });
        self
    }

    /// Add ordering for this query.
    pub fn with_order(mut self, order: OrderSpec) -> Self {
        self.order_by.push(order);
        self
    }

    /// Set pagination for this query.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_query() {
        let query = GraphQuery::new("User")
            .with_fields(vec!["id".into(), "name".into(), "email".into()])
            .with_filter(FilterExpr::eq("active", true).into())
            .with_order(OrderSpec::asc("name"))
            .with_pagination(Pagination::limit(10));

        assert_eq!(query.root_entity, "User");
        assert_eq!(query.fields.len(), 3);
        assert!(query.filter.is_some());
        assert_eq!(query.order_by.len(), 1);
        assert!(query.pagination.is_some());
    }

    #[test]
    fn test_nested_filter() {
        let filter = FilterExpr::and(vec![
            FilterExpr::or(vec![
                FilterExpr::eq("name", "jessica"),
                FilterExpr::like("name", "%o%"),
            ]),
            FilterExpr::is_not_null("email"),
        ]);

        match &filter {
            FilterExpr::And(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(&children[0], FilterExpr::Or(inner) if inner.len() == 2));
                assert_eq!(children[1].field(), Some("email"));
            }
            _ => panic!("Expected And filter"),
        }
    }

    #[test]
    fn test_leaf_field() {
        assert_eq!(FilterExpr::eq("name", "amy").field(), Some("name"));
        assert_eq!(
            FilterExpr::in_values("age", vec![Value::Int32(20)]).field(),
            Some("age")
        );
        assert_eq!(FilterExpr::or(vec![]).field(), None);
    }

    #[test]
    fn test_and_where_appends() {
        let query = GraphQuery::new("User")
            .and_where(FilterExpr::eq("other", "goodbye"))
            .and_where(FilterExpr::eq("name", "%a%"))
            .and_where(FilterExpr::eq("age", 20));

        assert_eq!(
            query.filter.unwrap().expression,
            FilterExpr::and(vec![
                FilterExpr::eq("other", "goodbye"),
                FilterExpr::eq("name", "%a%"),
                FilterExpr::eq("age", 20),
            ])
        );
    }

    #[test]
    fn test_filter_json_roundtrip() {
        let filter = FilterExpr::and(vec![
            FilterExpr::in_values("name", vec!["jessica".into(), "%o%".into()]),
            FilterExpr::eq("age", 53),
        ]);

        let json = serde_json::to_string(&filter).unwrap();
        let decoded: FilterExpr = serde_json::from_str(&json).unwrap();
        assert_eq!(filter, decoded);
    }
}
