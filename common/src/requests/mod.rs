use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze-image`: the screenshot to analyze, already
/// base64-encoded by the browser.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    pub image: String,
    pub media_type: String,
}

/// Error body returned by the proxy endpoint for every failure.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
