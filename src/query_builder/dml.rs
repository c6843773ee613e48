use crate::error::KnexError;
use crate::query::QueryAndParams;
use crate::results::ExecResult;
use crate::types::Value;

use super::QueryBuilder;

impl QueryBuilder<'_> {
    /// Render `INSERT INTO table (c1, c2) VALUES (?, ?)` with columns in the given order.
    ///
    /// Where-clauses, ordering and pagination are ignored.
    #[must_use]
    pub fn build_insert<I, K, V>(&self, data: I) -> QueryAndParams
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut columns = Vec::new();
        let mut params = Vec::new();
        for (column, value) in data {
            columns.push(column.as_ref().to_string());
            params.push(value.into());
        }
        let placeholders = vec!["?"; columns.len()].join(", ");

        QueryAndParams::new(
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                columns.join(", "),
                placeholders
            ),
            params,
        )
    }

    /// Render `UPDATE table SET c1 = ?, ... [WHERE ...]`.
    ///
    /// SET arguments come first, then the where arguments, matching placeholder order.
    ///
    /// # Errors
    /// Returns `KnexError::ParameterError` if `data` is empty, or `KnexError::UnguardedWrite` if
    /// [`QueryBuilder::require_where`] is set and no where-clause was added.
    pub fn build_update<I, K, V>(&self, data: I) -> Result<QueryAndParams, KnexError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut set_clause = Vec::new();
        let mut params = Vec::new();
        for (column, value) in data {
            set_clause.push(format!("{} = ?", column.as_ref()));
            params.push(value.into());
        }
        if set_clause.is_empty() {
            return Err(KnexError::ParameterError(format!(
                "UPDATE {} needs at least one column to set",
                self.table
            )));
        }
        self.check_where_guard("UPDATE")?;

        let mut query = format!("UPDATE {} SET {}", self.table, set_clause.join(", "));
        if let Some(where_sql) = self.where_sql() {
            query.push_str(&where_sql);
            params.extend(self.where_args.iter().cloned());
        }

        Ok(QueryAndParams::new(query, params))
    }

    /// Render `DELETE FROM table [WHERE ...]`.
    ///
    /// # Errors
    /// Returns `KnexError::UnguardedWrite` if [`QueryBuilder::require_where`] is set and no
    /// where-clause was added.
    pub fn build_delete(&self) -> Result<QueryAndParams, KnexError> {
        self.check_where_guard("DELETE")?;

        let mut query = format!("DELETE FROM {}", self.table);
        if let Some(where_sql) = self.where_sql() {
            query.push_str(&where_sql);
        }

        Ok(QueryAndParams::new(query, self.where_args.clone()))
    }

    /// Insert one row built from `(column, value)` pairs.
    ///
    /// # Errors
    /// Returns the driver's error if the statement fails.
    pub async fn insert<I, K, V>(&self, data: I) -> Result<ExecResult, KnexError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let statement = self.build_insert(data);
        self.run("insert", statement).await
    }

    /// Update matching rows. With no where-clause this updates every row in the table.
    ///
    /// # Errors
    /// See [`QueryBuilder::build_update`]; otherwise the driver's error if the statement fails.
    pub async fn update<I, K, V>(&self, data: I) -> Result<ExecResult, KnexError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let statement = self.build_update(data)?;
        self.run("update", statement).await
    }

    /// Delete matching rows. With no where-clause this deletes every row in the table.
    ///
    /// # Errors
    /// See [`QueryBuilder::build_delete`]; otherwise the driver's error if the statement fails.
    pub async fn delete(&self) -> Result<ExecResult, KnexError> {
        let statement = self.build_delete()?;
        self.run("delete", statement).await
    }

    async fn run(&self, op: &str, statement: QueryAndParams) -> Result<ExecResult, KnexError> {
        let QueryAndParams { query, params } = statement;
        tracing::debug!(table = %self.table, sql = %query, params = params.len(), "{op}");
        self.executor.execute(&query, &params).await
    }

    fn check_where_guard(&self, verb: &str) -> Result<(), KnexError> {
        if self.require_where && self.where_clauses.is_empty() {
            return Err(KnexError::UnguardedWrite(format!(
                "{verb} on {} has no WHERE clause",
                self.table
            )));
        }
        Ok(())
    }
}
