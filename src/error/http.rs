//! Remediation hints for HTTP error statuses.

/// Reason phrase and remediation hint for an HTTP error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusHint {
    /// Short reason phrase, e.g. `"Forbidden"`.
    pub reason: &'static str,
    /// What the caller can do about it.
    pub hint: &'static str,
}

/// Returns the hint for a status code the platform is known to emit.
///
/// ```rust
/// use mat3ra_api_client::status_hint;
///
/// let hint = status_hint(403).unwrap();
/// assert!(hint.hint.contains("project"));
/// assert!(status_hint(418).is_none());
/// ```
pub fn status_hint(status: u16) -> Option<StatusHint> {
    let (reason, hint) = match status {
        400 => ("Bad Request", "Check your request parameters and data."),
        401 => (
            "Unauthorized",
            "Check your authentication token or log in again.",
        ),
        403 => (
            "Forbidden",
            "You do not have permission to access this resource. \
             Set the correct project or check your account permissions.",
        ),
        404 => (
            "Not Found",
            "The requested resource does not exist. Check the ID or path.",
        ),
        409 => ("Conflict", "A resource with this identifier already exists."),
        422 => (
            "Unprocessable Entity",
            "The request data is invalid. Check your input.",
        ),
        429 => (
            "Too Many Requests",
            "You have exceeded your quota. Update your quota or try again later.",
        ),
        500 => (
            "Internal Server Error",
            "An error occurred on the server. Contact support if the problem persists.",
        ),
        503 => (
            "Service Unavailable",
            "The service is temporarily unavailable. Try again later.",
        ),
        _ => return None,
    };
    Some(StatusHint { reason, hint })
}
