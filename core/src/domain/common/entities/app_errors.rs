use thiserror::Error;

/// Message shown to the user for every inference failure.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Unable to analyze meal. Please ensure the plate is clearly visible and centered.";

/// Message shown to the user when the captured image could not be read.
pub const CAPTURE_FAILED_MESSAGE: &str =
    "Analysis timed out. Please check your image clarity and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Missing Gemini API key")]
    MissingApiKey,

    #[error("Failed to read image: {0}")]
    ImageRead(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Unable to analyze meal. Please ensure the plate is clearly visible and centered.")]
    AnalysisFailed,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message a user sees for this error once it reaches the view.
    ///
    /// Capture failures and inference failures each collapse into one fixed
    /// message; the underlying cause is only logged.
    pub fn user_message(&self) -> &'static str {
        match self {
            CoreError::ImageRead(_) => CAPTURE_FAILED_MESSAGE,
            _ => ANALYSIS_FAILED_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_failed_displays_user_message() {
        assert_eq!(CoreError::AnalysisFailed.to_string(), ANALYSIS_FAILED_MESSAGE);
    }

    #[test]
    fn test_user_message_per_category() {
        assert_eq!(
            CoreError::ImageRead("eof".to_string()).user_message(),
            CAPTURE_FAILED_MESSAGE
        );
        assert_eq!(
            CoreError::ExternalServiceError("503".to_string()).user_message(),
            ANALYSIS_FAILED_MESSAGE
        );
        assert_eq!(
            CoreError::InvalidResponse("missing calories".to_string()).user_message(),
            ANALYSIS_FAILED_MESSAGE
        );
    }
}
