use super::Error;

/// Structured error returned by the Baserow REST API.
///
/// The API answers failed requests with a JSON body of the shape
/// `{"error": "ERROR_CODE", "detail": "..."}`.
#[derive(Debug)]
pub(super) struct ApiError {
    error: Box<str>,
    detail: Box<str>,
}

impl std::error::Error for ApiError {}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: {}", self.error, self.detail)
    }
}

impl Error {
    /// Creates an error from a structured API error response.
    pub fn api(error: impl Into<String>, detail: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Api(ApiError {
            error: error.into().into(),
            detail: detail.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an API error.
    pub fn is_api(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Api(_)))
    }

    /// Returns the API error code, e.g. `ERROR_ROW_DOES_NOT_EXIST`.
    pub fn api_error_code(&self) -> Option<&str> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::Api(api) => Some(&*api.error),
            _ => None,
        })
    }
}
