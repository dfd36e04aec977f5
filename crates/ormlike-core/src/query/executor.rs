//! In-memory query executor.
//!
//! Runs registered before-query hooks, then evaluates the (possibly
//! rewritten) query against rows held in memory.

use std::cmp::Ordering;
use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::catalog::{Catalog, EntityDef};
use crate::error::Error;

use super::context::QueryContext;
use super::filter::{extract_filter_fields, FilterEvaluator};
use super::hooks::{HookRegistry, Plugin};

use ormlike_proto::{GraphQuery, OrderDirection, OrderSpec, Pagination, Value};

/// One stored entity instance as `(field, value)` pairs.
pub type Row = Vec<(String, Value)>;

/// Result of executing a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Entity type queried.
    pub entity: String,
    /// Matching rows, after ordering, pagination and projection.
    pub rows: Vec<Row>,
    /// Whether pagination cut off further matches.
    pub has_more: bool,
    /// The query as evaluated, after all hooks ran.
    pub executed: GraphQuery,
}

impl QueryResult {
    /// Number of rows returned.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows were returned.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Collect one field's value from every row, in row order.
    pub fn column(&self, field: &str) -> Vec<&Value> {
        self.rows
            .iter()
            .filter_map(|row| row.iter().find(|(n, _)| n == field).map(|(_, v)| v))
            .collect()
    }
}

/// Query executor over an in-memory row store.
#[derive(Debug, Default)]
pub struct QueryExecutor {
    catalog: Catalog,
    hooks: HookRegistry,
    rows: RwLock<HashMap<String, Vec<Row>>>,
}

impl QueryExecutor {
    /// Create an executor over a catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            hooks: HookRegistry::new(),
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// The catalog queries are resolved against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The registered hooks.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Mutable access to the hooks, for registering plain hooks.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Install a plugin's hooks.
    pub fn use_plugin(&mut self, plugin: &dyn Plugin) -> Result<(), Error> {
        plugin.initialize(&mut self.hooks)
    }

    /// Store a row for an entity.
    ///
    /// Every field must be declared and hold a value of its declared type.
    pub fn insert<I, K>(&self, entity: &str, fields: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let def = self.resolve_entity(entity)?;
        let row: Row = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();

        for (name, value) in &row {
            let field = def.get_field(name).ok_or_else(|| Error::UnknownField {
                entity: entity.to_string(),
                field: name.clone(),
            })?;
            if !field.field_type.accepts(value) {
                return Err(Error::TypeMismatch {
                    field: name.clone(),
                    expected: format!("{:?}", field.field_type),
                });
            }
        }

        self.rows.write().entry(def.name).or_default().push(row);
        Ok(())
    }

    /// Execute a read query.
    #[instrument(skip(self, query, context), fields(entity = %query.root_entity))]
    pub fn execute(&self, query: &GraphQuery, context: &QueryContext) -> Result<QueryResult, Error> {
        let def = self.resolve_entity(&query.root_entity)?;

        let mut query = query.clone();
        self.hooks.run_before_query(&mut query, context, &def);

        Self::validate_fields(&def, &query)?;

        let mut rows: Vec<Row> = {
            let store = self.rows.read();
            store
                .get(&def.name)
                .map(|rows| {
                    rows.iter()
                        .filter(|row| match &query.filter {
                            Some(filter) => FilterEvaluator::evaluate(&filter.expression, row),
                            None => true,
                        })
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };
        debug!(matched = rows.len(), "filter evaluated");

        Self::sort_rows(&mut rows, &query.order_by);
        let has_more = Self::apply_pagination(&mut rows, query.pagination.as_ref());

        if !query.fields.is_empty() {
            for row in &mut rows {
                row.retain(|(name, _)| query.fields.contains(name));
            }
        }

        Ok(QueryResult {
            entity: def.name,
            rows,
            has_more,
            executed: query,
        })
    }

    fn resolve_entity(&self, name: &str) -> Result<EntityDef, Error> {
        self.catalog
            .entity(name)
            .ok_or_else(|| Error::UnknownEntity(name.to_string()))
    }

    /// Every field the query references must exist on the entity.
    fn validate_fields(def: &EntityDef, query: &GraphQuery) -> Result<(), Error> {
        let mut referenced: Vec<String> = query
            .filter
            .as_ref()
            .map(|f| extract_filter_fields(&f.expression).into_iter().collect())
            .unwrap_or_default();
        referenced.sort();
        referenced.extend(query.fields.iter().cloned());
        referenced.extend(query.order_by.iter().map(|o| o.field.clone()));

        match referenced.into_iter().find(|f| !def.has_field(f)) {
            Some(field) => Err(Error::UnknownField {
                entity: def.name.clone(),
                field,
            }),
            None => Ok(()),
        }
    }

    fn sort_rows(rows: &mut [Row], order_by: &[OrderSpec]) {
        if order_by.is_empty() {
            return;
        }

        rows.sort_by(|a, b| {
            for spec in order_by {
                let a_val = a.iter().find(|(n, _)| n == &spec.field).map(|(_, v)| v);
                let b_val = b.iter().find(|(n, _)| n == &spec.field).map(|(_, v)| v);

                let cmp = Self::compare_values_opt(a_val, b_val);
                let cmp = match spec.direction {
                    OrderDirection::Asc => cmp,
                    OrderDirection::Desc => cmp.reverse(),
                };

                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        });
    }

    fn compare_values_opt(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less, // NULLs first
            (Some(_), None) => Ordering::Greater,
            (Some(av), Some(bv)) => Self::compare_values(av, bv),
        }
    }

    fn compare_values(a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Int32(a), Value::Int64(b)) => (*a as i64).cmp(b),
            (Value::Int64(a), Value::Int32(b)) => a.cmp(&(*b as i64)),
            (Value::Float32(a), Value::Float32(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }

    /// Apply pagination to rows. Returns true if there are more results.
    fn apply_pagination(rows: &mut Vec<Row>, pagination: Option<&Pagination>) -> bool {
        let Some(pag) = pagination else {
            return false;
        };
        let offset = pag.offset as usize;
        let limit = pag.limit as usize;

        if offset >= rows.len() {
            rows.clear();
            return false;
        }
        rows.drain(0..offset);

        if limit < rows.len() {
            rows.truncate(limit);
            return true;
        }
        false
    }
}
