use super::Error;

/// Error raised by the transport below the API, e.g. a failed connection.
#[derive(Debug)]
pub(super) struct TransportError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a transport failure.
    ///
    /// This is the preferred way to convert HTTP client errors into baserow errors.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Transport(TransportError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a transport error.
    pub fn is_transport(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Transport(_)))
    }
}
