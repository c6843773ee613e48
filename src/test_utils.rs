//! Test double for the executor contract.
//!
//! `RecordingExecutor` remembers every statement handed to it and answers SELECTs with canned
//! rows, so builder output can be checked without a database.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::KnexError;
use crate::executor::Executor;
use crate::query::QueryAndParams;
use crate::results::{ExecResult, ResultSet};
use crate::types::Value;

/// Which side of the executor contract a statement went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Query,
    Execute,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub statement: QueryAndParams,
}

#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<RecordedCall>>,
    rows: ResultSet,
    exec_result: ExecResult,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl RecordingExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every SELECT with these rows.
    #[must_use]
    pub fn with_rows(mut self, column_names: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let mut rs = ResultSet::with_capacity(rows.len());
        rs.set_column_names(Arc::new(
            column_names.iter().map(|c| (*c).to_string()).collect(),
        ));
        for row in rows {
            rs.add_row_values(row);
        }
        self.rows = rs;
        self
    }

    /// Answer every write with this result.
    #[must_use]
    pub fn with_exec_result(mut self, exec_result: ExecResult) -> Self {
        self.exec_result = exec_result;
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// The most recent statement, if any.
    #[must_use]
    pub fn last(&self) -> Option<QueryAndParams> {
        lock(&self.calls).last().map(|c| c.statement.clone())
    }

    fn record(&self, kind: CallKind, query: &str, params: &[Value]) {
        lock(&self.calls).push(RecordedCall {
            kind,
            statement: QueryAndParams::new(query, params.to_vec()),
        });
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute(&self, query: &str, params: &[Value]) -> Result<ExecResult, KnexError> {
        self.record(CallKind::Execute, query, params);
        Ok(self.exec_result)
    }

    async fn query_rows(&self, query: &str, params: &[Value]) -> Result<ResultSet, KnexError> {
        self.record(CallKind::Query, query, params);
        Ok(self.rows.clone())
    }
}
