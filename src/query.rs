use crate::types::Value;

/// A rendered SQL statement and its positional parameters.
///
/// `params[i]` binds to the `i`-th `?` in `query`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query
    pub params: Vec<Value>,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// Number of `?` placeholders in the query text.
    ///
    /// Counts every `?`, including any inside quoted literals; builder output never has those.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.query.matches('?').count()
    }
}
