//! Knex-style fluent builder.
//!
//! A builder is bound to one table and one executor. Configuration calls consume and return
//! it; terminal calls (`first`, `fetch_all`, `insert`, `update`, `delete`) render the statement
//! from the current state and run it.
//!
//! Rendering is deterministic: where-clauses keep call order, and every column/value input is
//! an ordered sequence of pairs rather than a map.
//!
//! `update` and `delete` without any where-clause touch every row of the table. Call
//! [`QueryBuilder::require_where`] to refuse that instead.

use std::fmt;

use crate::executor::Executor;
use crate::types::Value;

mod dml;
mod select;

/// Fluent SELECT/INSERT/UPDATE/DELETE builder for a single table.
pub struct QueryBuilder<'e> {
    executor: &'e dyn Executor,
    table: String,
    /// empty renders `*`
    select_cols: Vec<String>,
    /// rendered predicates, joined with AND
    where_clauses: Vec<String>,
    /// one per predicate, same order
    where_args: Vec<Value>,
    order_by: Option<(String, String)>,
    limit: i64,
    offset: i64,
    require_where: bool,
}

impl<'e> QueryBuilder<'e> {
    /// Create a builder for `table` that runs its statements on `executor`.
    pub fn new(executor: &'e dyn Executor, table: &str) -> Self {
        Self {
            executor,
            table: table.to_string(),
            select_cols: Vec::new(),
            where_clauses: Vec::new(),
            where_args: Vec::new(),
            order_by: None,
            limit: 0,
            offset: 0,
            require_where: false,
        }
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Replace the selected columns. An empty list selects `*`.
    #[must_use]
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_cols = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add `column = ?` for every pair, in the order given.
    ///
    /// ```rust
    /// # use knex_sql::prelude::*;
    /// # fn demo(db: &Database) {
    /// let q = db
    ///     .table("users")
    ///     .where_equal([("status", Value::from("active")), ("team_id", Value::from(4))])
    ///     .build_select();
    /// assert_eq!(q.query, "SELECT * FROM users WHERE status = ? AND team_id = ?");
    /// # }
    /// ```
    #[must_use]
    pub fn where_equal<I, K, V>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (column, value) in conditions {
            self.push_where(format!("{} = ?", column.as_ref()), value.into());
        }
        self
    }

    /// Add `column operator ?`.
    ///
    /// The operator is pasted into the SQL verbatim; only pass trusted operator strings.
    #[must_use]
    pub fn where_condition(mut self, column: &str, operator: &str, value: impl Into<Value>) -> Self {
        self.push_where(format!("{column} {operator} ?"), value.into());
        self
    }

    /// Set the sort key, replacing any earlier one. `direction` is not validated.
    #[must_use]
    pub fn order_by(mut self, column: &str, direction: &str) -> Self {
        self.order_by = Some((column.to_string(), direction.to_string()));
        self
    }

    /// Set LIMIT; zero or negative omits the clause.
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set OFFSET; zero or negative omits the clause.
    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Make `update` and `delete` fail with `KnexError::UnguardedWrite` when no where-clause
    /// has been added, instead of touching the whole table.
    #[must_use]
    pub fn require_where(mut self) -> Self {
        self.require_where = true;
        self
    }

    // fragment and argument always land together
    fn push_where(&mut self, fragment: String, value: Value) {
        self.where_clauses.push(fragment);
        self.where_args.push(value);
    }

    fn where_sql(&self) -> Option<String> {
        if self.where_clauses.is_empty() {
            None
        } else {
            Some(format!(" WHERE {}", self.where_clauses.join(" AND ")))
        }
    }
}

impl fmt::Debug for QueryBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("table", &self.table)
            .field("select_cols", &self.select_cols)
            .field("where_clauses", &self.where_clauses)
            .field("where_args", &self.where_args)
            .field("order_by", &self.order_by)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("require_where", &self.require_where)
            .finish_non_exhaustive()
    }
}
