use thiserror::Error;

/// Type alias for Result with TriageError
pub type Result<T> = std::result::Result<T, TriageError>;

/// Error types for the triage workflows
#[derive(Error, Debug)]
pub enum TriageError {
    /// Gmail API returned an error
    #[error("Gmail API error: {0}")]
    ApiError(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Network-related error (connection issues, timeouts, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server returned 5xx error
    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden (403)
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Filter-related errors
    #[error("Filter error: {0}")]
    FilterError(String),

    /// The decision source could not produce an answer
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// User cancelled operation
    #[error("Operation cancelled: {0}")]
    OperationCancelled(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TriageError {
    /// Short operator hint printed under the error message, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TriageError::AuthError(_) => Some(
                "Make sure credentials.json is a valid OAuth client secret \
                 (Google Cloud Console > APIs & Services > Credentials), \
                 then run: gmail-triage auth --force",
            ),
            TriageError::Forbidden(_) => Some(
                "The cached token may lack a required scope. \
                 Run: gmail-triage auth --force",
            ),
            TriageError::ConfigError(_) => Some(
                "Check the configuration file, or regenerate it with: \
                 gmail-triage init-config --force",
            ),
            _ => None,
        }
    }
}

impl From<google_gmail1::Error> for TriageError {
    fn from(error: google_gmail1::Error) -> Self {
        match error {
            // HTTP response with status code (non-success responses)
            google_gmail1::Error::Failure(ref response) => {
                let status = response.status();
                let status_code = status.as_u16();
                let message = format!(
                    "HTTP {}: {}",
                    status_code,
                    status.canonical_reason().unwrap_or("Unknown")
                );

                match status_code {
                    404 => TriageError::NotFound(message),
                    400 => TriageError::BadRequest(message),
                    401 => TriageError::AuthError(message),
                    403 => TriageError::Forbidden(message),
                    500..=599 => TriageError::ServerError {
                        status: status_code,
                        message,
                    },
                    _ => TriageError::ApiError(message),
                }
            }
            google_gmail1::Error::BadRequest(ref err) => TriageError::BadRequest(format!("{}", err)),
            google_gmail1::Error::HttpError(ref err) => {
                TriageError::NetworkError(format!("Connection error: {}", err))
            }
            google_gmail1::Error::Io(err) => TriageError::NetworkError(err.to_string()),
            google_gmail1::Error::MissingToken(ref err) => {
                TriageError::AuthError(format!("No usable token: {}", err))
            }
            _ => TriageError::ApiError(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TriageError::ServerError {
            status: 503,
            message: "Service unavailable".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("HTTP 503"));
        assert!(display.contains("Service unavailable"));

        let auth_error = TriageError::AuthError("Invalid token".to_string());
        assert!(format!("{}", auth_error).contains("Authentication failed"));
    }

    #[test]
    fn test_hints() {
        assert!(TriageError::AuthError("x".into()).hint().is_some());
        assert!(TriageError::ConfigError("x".into()).hint().is_some());
        assert!(TriageError::Forbidden("x".into()).hint().is_some());
        assert!(TriageError::PromptError("x".into()).hint().is_none());
        assert!(TriageError::ApiError("x".into()).hint().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TriageError = io.into();
        assert!(matches!(err, TriageError::IoError(_)));
    }
}
