//! Request and response shapes of the upstream messages API.
//!
//! Only the parts this application reads or writes are modelled; unknown
//! response members are ignored.

use serde::{Deserialize, Serialize};

use super::error::ExtractionError;
use super::prompt::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, EXTRACTION_PROMPT};
use crate::model::image::ImagePayload;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: Vec<RequestBlock>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBlock {
    Image { source: ImageSource },
    Text { text: String },
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub media_type: String,
    pub data: String,
}

impl MessagesRequest {
    /// One user turn: the image block followed by the extraction prompt.
    pub fn for_image(image: &ImagePayload) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    RequestBlock::Image {
                        source: ImageSource {
                            kind: "base64".to_string(),
                            media_type: image.media_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                    RequestBlock::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                ],
            }],
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Error member of a response. The upstream API sends an object with a
/// `message`; the proxy endpoint sends a bare string.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ApiError {
    Message(String),
    Detailed {
        #[serde(default)]
        message: Option<String>,
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
}

impl ApiError {
    pub fn message(&self) -> String {
        let message = match self {
            ApiError::Message(message) => Some(message.as_str()),
            ApiError::Detailed { message, .. } => message.as_deref(),
        };
        match message {
            Some(message) if !message.trim().is_empty() => message.to_string(),
            _ => "API error".to_string(),
        }
    }
}

impl MessagesResponse {
    /// Text of the first `text` block, or `""` when there is none.
    pub fn text(&self) -> &str {
        self.content
            .iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .unwrap_or("")
    }
}

/// Status and body as received by a transport, before any interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Interprets a raw response. An explicit error payload wins over the status
/// code so the upstream's own message reaches the user.
pub fn decode_response(raw: &RawResponse) -> Result<MessagesResponse, ExtractionError> {
    match serde_json::from_str::<MessagesResponse>(&raw.body) {
        Ok(response) => {
            if let Some(error) = &response.error {
                return Err(ExtractionError::Upstream(error.message()));
            }
            if !raw.is_success() {
                return Err(status_error(raw.status));
            }
            Ok(response)
        }
        Err(e) if raw.is_success() => Err(ExtractionError::Transport(format!(
            "unreadable response body: {e}"
        ))),
        Err(_) => Err(status_error(raw.status)),
    }
}

fn status_error(status: u16) -> ExtractionError {
    ExtractionError::Transport(format!("upstream returned HTTP {status}"))
}
