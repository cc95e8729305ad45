use thiserror::Error;

use crate::editor::validate::FieldError;

/// Application-level error type, split along the failure taxonomy the UI
/// reports against: transport failures, backend-reported failures (message
/// passed through verbatim), and local validation that never reaches the
/// network. A failed call leaves the in-memory draft untouched; the caller
/// surfaces the error and the user retries manually. No retry loops.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with `success: false` or a non-2xx status. The
    /// message is the backend's own, verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Local submit-time validation failed; the request was never sent.
    #[error("validation failed ({} field(s))", .0.len())]
    Validation(Vec<FieldError>),

    #[error("not logged in (run `folio login` first)")]
    Unauthorized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_surfaces_backend_message_verbatim() {
        let err = AppError::Api {
            status: 422,
            message: "Title is required".to_string(),
        };
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_validation_error_counts_fields() {
        let err = AppError::Validation(vec![
            FieldError {
                field: "title".to_string(),
                message: "Title is required".to_string(),
            },
            FieldError {
                field: "personalInfo.email".to_string(),
                message: "Invalid email address".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "validation failed (2 field(s))");
    }
}
