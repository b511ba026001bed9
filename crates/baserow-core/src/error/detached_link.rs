use super::Error;

/// Error when a linked row that is not cached must be loaded but the
/// collection is not bound to a database.
#[derive(Debug)]
pub(super) struct DetachedLink {
    row_id: u64,
}

impl std::error::Error for DetachedLink {}

impl core::fmt::Display for DetachedLink {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot load linked row {}: collection is not bound to a database",
            self.row_id
        )
    }
}

impl Error {
    /// Creates a detached link error for the given row id.
    pub fn detached_link(row_id: u64) -> Error {
        Error::from(super::ErrorKind::DetachedLink(DetachedLink { row_id }))
    }

    /// Returns `true` if this error is a detached link error.
    pub fn is_detached_link(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::DetachedLink(_)))
    }
}
