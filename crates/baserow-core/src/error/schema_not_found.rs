use super::Error;

/// The kind of remote object that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaObject {
    Database,
    Table,
    Field,
    Model,
}

/// Error when mapping generation or a mapping lookup cannot resolve a name.
///
/// The path names every level that was resolved so far, e.g.
/// `'Blog'/'Posts'/'Title'` for a missing field.
#[derive(Debug)]
pub(super) struct SchemaNotFound {
    what: SchemaObject,
    path: Box<str>,
}

impl std::error::Error for SchemaNotFound {}

impl core::fmt::Display for SchemaNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.what {
            SchemaObject::Database => write!(f, "database {} does not exist", self.path),
            SchemaObject::Table => write!(f, "table {} does not exist", self.path),
            SchemaObject::Field => write!(f, "field {} does not exist", self.path),
            SchemaObject::Model => {
                write!(f, "model {} is not part of the schema mapping", self.path)
            }
        }
    }
}

impl Error {
    /// Creates an error for a database, table, field or model that could not be resolved.
    pub fn schema_not_found(what: SchemaObject, path: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaNotFound(SchemaNotFound {
            what,
            path: path.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a schema resolution error.
    pub fn is_schema_not_found(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::SchemaNotFound(_)))
    }

    /// Returns the kind of object that failed to resolve, if this is a schema resolution error.
    pub fn schema_object(&self) -> Option<SchemaObject> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::SchemaNotFound(e) => Some(e.what),
            _ => None,
        })
    }
}
