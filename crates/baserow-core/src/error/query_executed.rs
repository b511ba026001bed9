use super::Error;

/// Error when a query is modified after it started producing rows.
#[derive(Debug)]
pub(super) struct QueryExecuted;

impl std::error::Error for QueryExecuted {}

impl core::fmt::Display for QueryExecuted {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("query has already been executed")
    }
}

impl Error {
    /// Creates a query usage error.
    pub fn query_executed() -> Error {
        Error::from(super::ErrorKind::QueryExecuted(QueryExecuted))
    }

    /// Returns `true` if this error is a query usage error.
    pub fn is_query_executed(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::QueryExecuted(_)))
    }
}
