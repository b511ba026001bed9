use super::Error;

#[derive(Debug)]
enum Reason {
    Missing,
    Unrecognized,
}

/// Error when a model instance is built from a record whose keys do not
/// match the declared attributes.
#[derive(Debug)]
pub(super) struct InvalidRecord {
    model: Box<str>,
    attribute: Box<str>,
    reason: Reason,
}

impl std::error::Error for InvalidRecord {}

impl core::fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.reason {
            Reason::Missing => write!(f, "{}: missing attribute '{}'", self.model, self.attribute),
            Reason::Unrecognized => write!(
                f,
                "{}: unrecognized attribute '{}'",
                self.model, self.attribute
            ),
        }
    }
}

impl Error {
    /// Creates an error for a declared attribute that is absent from a record.
    pub fn missing_attribute(model: impl Into<String>, attribute: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidRecord(InvalidRecord {
            model: model.into().into(),
            attribute: attribute.into().into(),
            reason: Reason::Missing,
        }))
    }

    /// Creates an error for a record key that the model does not declare.
    pub fn unrecognized_attribute(model: impl Into<String>, attribute: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidRecord(InvalidRecord {
            model: model.into().into(),
            attribute: attribute.into().into(),
            reason: Reason::Unrecognized,
        }))
    }

    /// Returns `true` if this error is a record construction error.
    pub fn is_invalid_record(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidRecord(_)))
    }
}
