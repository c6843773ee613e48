use crate::error::KnexError;
use crate::query::QueryAndParams;
use crate::results::Record;
use crate::types::Value;

use super::QueryBuilder;

fn convert_result(record: Record) -> Record {
    record.map_values(Value::normalize_bytes)
}

impl QueryBuilder<'_> {
    /// Render the SELECT for the current state.
    ///
    /// Clause order is fixed: columns, WHERE, ORDER BY, LIMIT, OFFSET.
    #[must_use]
    pub fn build_select(&self) -> QueryAndParams {
        let mut query = String::from("SELECT ");
        if self.select_cols.is_empty() {
            query.push('*');
        } else {
            query.push_str(&self.select_cols.join(", "));
        }
        query.push_str(" FROM ");
        query.push_str(&self.table);

        if let Some(where_sql) = self.where_sql() {
            query.push_str(&where_sql);
        }

        if let Some((column, direction)) = &self.order_by {
            query.push_str(&format!(" ORDER BY {column} {direction}"));
        }

        if self.limit > 0 {
            query.push_str(&format!(" LIMIT {}", self.limit));
        }

        if self.offset > 0 {
            query.push_str(&format!(" OFFSET {}", self.offset));
        }

        QueryAndParams::new(query, self.where_args.clone())
    }

    /// Fetch exactly one row.
    ///
    /// Sets the builder's limit to 1 before rendering; the change sticks.
    ///
    /// # Errors
    /// Returns `KnexError::NotFound` if nothing matches, or the driver's error if the query fails.
    pub async fn first(&mut self) -> Result<Record, KnexError> {
        self.limit = 1;
        let QueryAndParams { query, params } = self.build_select();
        tracing::debug!(table = %self.table, sql = %query, params = params.len(), "first");
        let record = self.executor.query_row(&query, &params).await?;
        Ok(convert_result(record))
    }

    /// Fetch every matching row, in the order the database returns them.
    ///
    /// # Errors
    /// Returns the driver's error if the query fails.
    pub async fn fetch_all(&self) -> Result<Vec<Record>, KnexError> {
        let QueryAndParams { query, params } = self.build_select();
        tracing::debug!(table = %self.table, sql = %query, params = params.len(), "fetch_all");
        let result_set = self.executor.query_rows(&query, &params).await?;
        Ok(result_set.into_iter().map(convert_result).collect())
    }

    /// Knex spelling of [`QueryBuilder::fetch_all`].
    ///
    /// # Errors
    /// Returns the driver's error if the query fails.
    pub async fn get(&self) -> Result<Vec<Record>, KnexError> {
        self.fetch_all().await
    }
}

#[cfg(test)]
mod tests {
    use crate::query_builder::QueryBuilder;
    use crate::test_utils::RecordingExecutor;
    use crate::types::Value;

    #[test]
    fn bare_select_is_star() {
        let exec = RecordingExecutor::new();
        let none: [&str; 0] = [];
        let q = QueryBuilder::new(&exec, "users").select(none).build_select();
        assert_eq!(q.query, "SELECT * FROM users");
        assert!(q.params.is_empty());
    }

    #[test]
    fn columns_keep_call_order() {
        let exec = RecordingExecutor::new();
        let q = QueryBuilder::new(&exec, "users")
            .select(["a", "b"])
            .build_select();
        assert_eq!(q.query, "SELECT a, b FROM users");
    }

    #[test]
    fn full_clause_order() {
        let exec = RecordingExecutor::new();
        let q = QueryBuilder::new(&exec, "users")
            .where_condition("age", ">", 18)
            .order_by("age", "ASC")
            .limit(10)
            .offset(5)
            .build_select();
        assert_eq!(
            q.query,
            "SELECT * FROM users WHERE age > ? ORDER BY age ASC LIMIT 10 OFFSET 5"
        );
        assert_eq!(q.params, vec![Value::Int(18)]);
    }

    #[test]
    fn non_positive_pagination_is_omitted() {
        let exec = RecordingExecutor::new();
        for n in [0, -1] {
            let q = QueryBuilder::new(&exec, "t").limit(n).offset(n).build_select();
            assert_eq!(q.query, "SELECT * FROM t");
        }
        let q = QueryBuilder::new(&exec, "t").limit(5).build_select();
        assert_eq!(q.query, "SELECT * FROM t LIMIT 5");
        let q = QueryBuilder::new(&exec, "t").offset(5).build_select();
        assert_eq!(q.query, "SELECT * FROM t OFFSET 5");
    }

    #[test]
    fn rendering_does_not_consume_state() {
        let exec = RecordingExecutor::new();
        let qb = QueryBuilder::new(&exec, "t").where_condition("id", "=", 1);
        assert_eq!(qb.build_select(), qb.build_select());
    }
}
