use thiserror::Error;

/// Why an extraction attempt failed. Every variant is terminal for the
/// attempt; the user retries with a new upload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// The selected file cannot be sent (not an image, empty).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Network failure, non-2xx status, or an unreadable response body.
    #[error("{0}")]
    Transport(String),
    /// The API answered with an explicit error payload.
    #[error("{0}")]
    Upstream(String),
    /// The model's text did not contain parseable JSON.
    #[error("could not parse model response: {0}")]
    Parse(String),
}

impl ExtractionError {
    /// Message shown in the UI error banner.
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::InvalidInput(_) => "Please upload an image file".to_string(),
            other => format!("Failed to process image: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages() {
        assert_eq!(
            ExtractionError::InvalidInput("text/plain".into()).user_message(),
            "Please upload an image file"
        );
        assert_eq!(
            ExtractionError::Upstream("invalid x-api-key".into()).user_message(),
            "Failed to process image: invalid x-api-key"
        );
        assert_eq!(
            ExtractionError::Parse("expected value at line 1 column 1".into()).user_message(),
            "Failed to process image: could not parse model response: expected value at line 1 column 1"
        );
    }
}
