use super::Error;

/// Error when at least one row was expected but the backend returned none.
#[derive(Debug)]
pub(super) struct NoRowReturned;

impl std::error::Error for NoRowReturned {}

impl core::fmt::Display for NoRowReturned {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no row returned")
    }
}

impl Error {
    /// Creates a no-row error.
    pub fn no_row_returned() -> Error {
        Error::from(super::ErrorKind::NoRowReturned(NoRowReturned))
    }

    /// Returns `true` if this error is a no-row error.
    pub fn is_no_row_returned(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NoRowReturned(_)))
    }
}
