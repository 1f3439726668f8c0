//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on error types.
///
/// | ErrorKind         | Raised by        | Typical cause                      |
/// |-------------------|------------------|------------------------------------|
/// | `Unauthorized`    | HTTP 401         | Expired token, wrong credentials   |
/// | `Forbidden`       | HTTP 403         | Wrong project, missing permission  |
/// | `NotFound`        | HTTP 404         | Unknown id or path                 |
/// | `Conflict`        | HTTP 409         | Duplicate identifier               |
/// | `Unprocessable`   | HTTP 422         | Payload rejected by validation     |
/// | `RateLimited`     | HTTP 429         | Quota exhausted                    |
/// | `Api`             | Envelope         | `status` other than `"success"`    |
/// | `Configuration`   | Client           | Missing auth, bad environment      |
/// | `Unsupported`     | Client           | Capability not enabled on endpoint |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Authentication failed (invalid or expired credentials).
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// Valid credentials but insufficient permissions.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// Requested resource was not found.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Invalid request argument or payload.
    ///
    /// HTTP: 400 Bad Request, or a malformed input to a local helper.
    #[error("invalid argument")]
    InvalidArgument,

    /// A resource with the same identifier already exists.
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// The request was well-formed but its data was rejected.
    ///
    /// HTTP: 422 Unprocessable Entity
    #[error("unprocessable entity")]
    Unprocessable,

    /// Quota exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// Service temporarily unavailable.
    ///
    /// HTTP: 503 Service Unavailable
    #[error("service unavailable")]
    Unavailable,

    /// Request timed out.
    ///
    /// HTTP: 504 Gateway Timeout or client-side timeout
    #[error("timeout")]
    Timeout,

    /// Internal server error.
    ///
    /// HTTP: 500 Internal Server Error
    #[error("internal error")]
    Internal,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Generic transport error that doesn't fit a more specific category.
    #[error("transport error")]
    Transport,

    /// Response could not be decoded or lacks required fields.
    #[error("invalid response")]
    InvalidResponse,

    /// The response envelope reported a failure.
    ///
    /// The error message is the server-supplied `data.message`.
    #[error("api error")]
    Api,

    /// Configuration error (invalid URL, missing credentials).
    #[error("configuration error")]
    Configuration,

    /// The endpoint does not support the requested operation.
    #[error("unsupported operation")]
    Unsupported,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if the error was raised before any request was sent.
    #[inline]
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ErrorKind::Configuration | ErrorKind::Unsupported | ErrorKind::InvalidArgument
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::Unprocessable,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            502 => ErrorKind::Transport,
            503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(400, ErrorKind::InvalidArgument ; "bad request")]
    #[test_case(401, ErrorKind::Unauthorized ; "unauthorized")]
    #[test_case(403, ErrorKind::Forbidden ; "forbidden")]
    #[test_case(404, ErrorKind::NotFound ; "not found")]
    #[test_case(409, ErrorKind::Conflict ; "conflict")]
    #[test_case(422, ErrorKind::Unprocessable ; "unprocessable")]
    #[test_case(429, ErrorKind::RateLimited ; "rate limited")]
    #[test_case(500, ErrorKind::Internal ; "internal")]
    #[test_case(503, ErrorKind::Unavailable ; "unavailable")]
    #[test_case(504, ErrorKind::Timeout ; "gateway timeout")]
    #[test_case(418, ErrorKind::InvalidArgument ; "other client error")]
    #[test_case(599, ErrorKind::Internal ; "other server error")]
    #[test_case(302, ErrorKind::Unknown ; "redirect")]
    fn test_from_http_status(status: u16, expected: ErrorKind) {
        assert_eq!(ErrorKind::from_http_status(status), expected);
    }

    #[test]
    fn test_is_client_side() {
        assert!(ErrorKind::Configuration.is_client_side());
        assert!(ErrorKind::Unsupported.is_client_side());
        assert!(!ErrorKind::Api.is_client_side());
        assert!(!ErrorKind::Forbidden.is_client_side());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::Api.to_string(), "api error");
        assert_eq!(ErrorKind::Unsupported.to_string(), "unsupported operation");
        assert_eq!(ErrorKind::Forbidden.to_string(), "forbidden");
    }
}
